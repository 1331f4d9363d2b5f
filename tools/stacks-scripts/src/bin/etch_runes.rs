use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use stacks_scripts::{
    config::env_or,
    parse_args, require_env,
    runes::{etch_runes, validate_etch_args, OrdinalsBotClient},
    run_script, ToolResponse,
};

const USAGE: &str = "Usage: etch-runes <rune_name> <symbol> [network]";
const EXAMPLE: &str = "Example: etch-runes \"FAKTORY•TOKEN\" \"K\" testnet";

/// Etch a rune through OrdinalsBot, premining the full supply to RECEIVE_ADDRESS.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Rune name (eg, FAKTORY•TOKEN).
    rune_name: String,

    /// Single-character rune symbol.
    symbol: String,

    /// Bitcoin network: testnet or mainnet.
    #[arg(default_value = "testnet")]
    network: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    stacks_scripts::init();
    run_script(run()).await
}

async fn run() -> Result<ToolResponse<String>> {
    // Credentials are checked before arguments.
    let api_key = require_env("ORDINALSBOT_API_KEY")?;
    let receive_address = require_env("RECEIVE_ADDRESS")?;

    let cli: Cli = parse_args(USAGE, EXAMPLE)?;
    let request = validate_etch_args(&cli.rune_name, &cli.symbol, &cli.network)?;
    let host = env_or("ORDINALSBOT_API_URL", request.network.default_host());
    let client = OrdinalsBotClient::new(&host, &api_key);
    etch_runes(&client, &request, &receive_address).await
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
