use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use stacks_scripts::{jing::submit_ask, parse_args, run_script, Config, ToolResponse};

const USAGE: &str = "Usage: jing-submit-ask <swap_id> <pair> [account_index]";
const EXAMPLE: &str = "Example: jing-submit-ask 12 PEPE-STX";

/// Fill an open Jing ask: pay its STX price and receive its tokens.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// ID of the ask to fill.
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
    submit_ask(&node, &account, cli.swap_id, &cli.pair).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use stacks_scripts::args::parse_args_from;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positional_account_index_is_separate_from_config() {
        let cli: Cli = parse_args_from(["jing-submit-ask", "10", "PEPE-STX", "3"], USAGE, EXAMPLE).unwrap();
        assert_eq!(cli.swap_id, 10);
        assert_eq!(cli.pair, "PEPE-STX");
        assert_eq!(cli.account_index, Some(3));

        let cli: Cli = parse_args_from(["jing-submit-ask", "10", "PEPE-STX"], USAGE, EXAMPLE).unwrap();
        assert_eq!(cli.account_index, None);
    }
}
