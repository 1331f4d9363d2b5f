use anyhow::Context;
use serde::Serialize;

use crate::{account::derive_child_accounts, account::Account, config::Config, node::StacksNode, response::ToolResponse};

/// Highest index listed by `get-wallet-addresses`.
pub const LISTED_MAX_INDEX: u32 = 9;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletStatus {
    pub account_index: u32,
    pub address: String,
    pub nonce: u64,
}

/// Addresses of accounts `0..=9` under the configured mnemonic.
pub fn get_wallet_addresses(config: &Config) -> anyhow::Result<ToolResponse<Vec<String>>> {
    let accounts = derive_child_accounts(config.network, config.mnemonic()?, LISTED_MAX_INDEX)?;
    let addresses: Vec<String> = accounts.iter().map(|a| a.address.to_string()).collect();
    for (index, address) in addresses.iter().enumerate() {
        println!("{index}: {address}");
    }
    Ok(ToolResponse::ok(
        format!("Derived {} {} addresses", addresses.len(), config.network),
        addresses,
    ))
}

pub async fn get_wallet_status(node: &dyn StacksNode, account: &Account) -> anyhow::Result<ToolResponse<WalletStatus>> {
    let nonce = node
        .account_nonce(&account.address)
        .await
        .with_context(|| format!("failed to fetch nonce of {}", account.address))?;
    println!("Account index: {}", account.index);
    println!("Account address: {}", account.address);
    println!("Nonce: {nonce}");
    Ok(ToolResponse::ok(
        "Wallet status",
        WalletStatus {
            account_index: account.index,
            address: account.address.to_string(),
            nonce,
        },
    ))
}
