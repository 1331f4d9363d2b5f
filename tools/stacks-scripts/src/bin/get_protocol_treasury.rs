use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use serde_json::Value;
use stacks_intent_types::ContractId;
use stacks_scripts::{dao::get_protocol_treasury, parse_args, run_script, Config, ScriptError, ToolResponse};

const USAGE: &str = "Usage: get-protocol-treasury <daoCoreProposalExtensionContract>";
const EXAMPLE: &str = "Example: get-protocol-treasury ST35K818S3K2GSNEBC3M35GA3W8Q7X72KF4RVM3QA.wed-core-proposals";

/// Show the treasury contract set in a DAO core proposals extension.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Core proposals extension (address.name).
    contract: String,

    #[command(flatten)]
    config: Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    stacks_scripts::init();
    run_script(run()).await
}

async fn run() -> Result<ToolResponse<Value>> {
    let cli: Cli = parse_args(USAGE, EXAMPLE)?;
    let contract: ContractId = cli.contract.parse().map_err(|e| ScriptError::Usage {
        message: format!("Invalid contract {}: {e}", cli.contract),
        usage: USAGE,
        example: EXAMPLE,
    })?;
    let account = cli.config.account(None)?;
    let node = cli.config.node();
    get_protocol_treasury(&node, &contract, &account.address).await
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
