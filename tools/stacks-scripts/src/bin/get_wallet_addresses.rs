use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use stacks_scripts::{parse_args, run_script, wallet::get_wallet_addresses, Config, ToolResponse};

const USAGE: &str = "Usage: get-wallet-addresses";
const EXAMPLE: &str = "Example: NETWORK=testnet MNEMONIC=\"...\" get-wallet-addresses";

/// List the first ten account addresses of the configured mnemonic.
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

async fn run() -> Result<ToolResponse<Vec<String>>> {
    let cli: Cli = parse_args(USAGE, EXAMPLE)?;
    get_wallet_addresses(&cli.config)
}
