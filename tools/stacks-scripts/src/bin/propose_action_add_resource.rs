use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use stacks_scripts::{
    dao::{propose_action_add_resource, ResourceProposal},
    parse_args, run_script, BroadcastResult, Config, ToolResponse,
};

const USAGE: &str = "Usage: propose-action-add-resource <daoActionProposalsExtensionContract> \
                     <daoActionProposalContract> <resourceName> <resourceDescription> <resourcePrice> [resourceUrl]";
const EXAMPLE: &str = "Example: propose-action-add-resource \
                       ST35K818S3K2GSNEBC3M35GA3W8Q7X72KF4RVM3QA.aibtcdao-action-proposals-v2 \
                       ST35K818S3K2GSNEBC3M35GA3W8Q7X72KF4RVM3QA.aibtcdao-action-add-resource \
                       \"consultation\" \"consult with me for 1hr\" 100000000 \"https://aibtc.dev\"";

/// Propose adding a paid resource to a DAO through its action proposals extension.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Action proposals extension (address.name).
    extension: String,

    /// Add-resource action contract (address.name).
    action: String,

    /// Resource name.
    name: String,

    /// Resource description.
    description: String,

    /// Resource price in micro-units; zero is allowed.
    price: u128,

    /// Optional resource URL.
    url: Option<String>,

    #[command(flatten)]
    config: Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    stacks_scripts::init();
    run_script(run()).await
}

async fn run() -> Result<ToolResponse<BroadcastResult>> {
    let cli: Cli = parse_args(USAGE, EXAMPLE)?;
    let proposal = ResourceProposal::parse(
        &cli.extension,
        &cli.action,
        &cli.name,
        &cli.description,
        cli.price,
        cli.url.as_deref(),
    )?;
    let account = cli.config.account(None)?;
    let node = cli.config.node();
    propose_action_add_resource(&node, &account, &proposal).await
}
