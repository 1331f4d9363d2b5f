use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use stacks_scripts::{jing::cancel_ask, parse_args, run_script, Config, ToolResponse};

const USAGE: &str = "Usage: jing-cancel-ask <swap_id> <pair> [account_index]";
const EXAMPLE: &str = "Example: jing-cancel-ask 10 PEPE-STX";

/// Cancel an open Jing ask you created and reclaim the escrowed tokens and fees.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// ID of the ask to cancel.
    swap_id: u64,

    /// Trading pair (eg, PEPE-STX).
    pair: String,

    /// Account index to sign with; defaults to ACCOUNT_INDEX.
    #[arg(id = "account_index_arg", value_name = "ACCOUNT_INDEX")]
    account_index: Option<u32>,

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
    let account = cli.config.account(cli.account_index)?;
    let node = cli.config.node();
    cancel_ask(&node, &account, cli.swap_id, &cli.pair).await
}
