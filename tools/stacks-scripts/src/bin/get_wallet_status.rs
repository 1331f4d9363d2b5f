use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use stacks_scripts::{
    parse_args, run_script,
    wallet::{get_wallet_status, WalletStatus},
    Config, ToolResponse,
};

const USAGE: &str = "Usage: get-wallet-status";
const EXAMPLE: &str = "Example: NETWORK=testnet MNEMONIC=\"...\" ACCOUNT_INDEX=0 get-wallet-status";

/// Show the address and nonce of the configured account.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(flatten)]
    config: Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    stacks_scripts::init();
    run_script(run()).await
}

async fn run() -> Result<ToolResponse<WalletStatus>> {
    let cli: Cli = parse_args(USAGE, EXAMPLE)?;
    let account = cli.config.account(None)?;
    let node = cli.config.node();
    get_wallet_status(&node, &account).await
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
