use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use stacks_intent_types::ContractId;
use stacks_scripts::{
    faucet::{faucet_flood, DEFAULT_TOKEN_CONTRACT},
    parse_args, run_script, Config, ToolResponse,
};

const USAGE: &str = "Usage: faucet-flood [token_contract]";
const EXAMPLE: &str = "Example: faucet-flood ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.aibtc-token";

/// Request a flood of aiBTC from the token faucet to the configured account.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// aiBTC token contract (address.name).
    #[arg(env = "AIBTC_TOKEN_CONTRACT", default_value = DEFAULT_TOKEN_CONTRACT)]
    token_contract: String,

    #[command(flatten)]
    config: Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    stacks_scripts::init();
    run_script(run()).await
}

async fn run() -> Result<ToolResponse<String>> {
    let cli: Cli = parse_args(USAGE, EXAMPLE)?;
    let token: ContractId = cli
        .token_contract
        .parse()
        .with_context(|| format!("invalid token contract {}", cli.token_contract))?;
    let account = cli.config.account(None)?;
    let node = cli.config.node();
    faucet_flood(&node, &account, &token).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
