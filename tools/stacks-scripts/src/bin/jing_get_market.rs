use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use serde_json::Value;
use stacks_scripts::{
    jing::{
        get_market,
        market::{DEFAULT_JING_API_KEY, DEFAULT_JING_API_URL},
        JingClient,
    },
    parse_args, run_script, Config, ToolResponse,
};

const USAGE: &str = "Usage: jing-get-market <pair>";
const EXAMPLE: &str = "Example: jing-get-market PEPE-STX";

/// Print the Jing order book for a token pair.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Trading pair (eg, PEPE-STX).
    pair: String,

    /// Jing backend base URL.
    #[arg(long, env = "JING_API_URL", default_value = DEFAULT_JING_API_URL)]
    jing_api_url: String,

    /// Jing backend API key.
    #[arg(long, env = "JING_API_KEY", default_value = DEFAULT_JING_API_KEY, hide_env_values = true)]
    jing_api_key: String,

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
    let account = cli.config.account(None)?;
    let client = JingClient::new(&cli.jing_api_url, &cli.jing_api_key);
    get_market(&client, &account, &cli.pair).await
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
