use std::fmt;

use clap::Args;
use stacks_intent_types::Network;

use crate::{
    account::{derive_child_account, Account},
    error::ScriptError,
    hiro::HiroClient,
};

/// Network, wallet and node settings shared by every script.
///
/// Flattened into each script's `Cli`, so every field can come from a flag or from the
/// environment (`.env` included).
#[derive(Args, Clone)]
pub struct Config {
    /// Stacks network: mainnet, testnet or devnet.
    #[arg(long, env = "NETWORK", default_value = "testnet")]
    pub network: Network,

    /// BIP-39 mnemonic of the wallet that signs transactions.
    #[arg(long, env = "MNEMONIC", hide_env_values = true)]
    pub mnemonic: Option<String>,

    /// Account index under the mnemonic.
    #[arg(long, env = "ACCOUNT_INDEX", default_value_t = 0)]
    pub account_index: u32,

    /// Override for the node/API base URL.
    #[arg(long = "api-url", env = "STACKS_API_URL")]
    pub api_url: Option<String>,
}

impl Config {
    pub fn new(network: Network, mnemonic: impl Into<String>, account_index: u32) -> Self {
        Self {
            network,
            mnemonic: Some(mnemonic.into()),
            account_index,
            api_url: None,
        }
    }

    pub fn mnemonic(&self) -> Result<&str, ScriptError> {
        match self.mnemonic.as_deref() {
            Some(m) if !m.trim().is_empty() => Ok(m),
            _ => Err(ScriptError::MissingEnv("MNEMONIC")),
        }
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or_else(|| self.network.default_api_url())
    }

    /// Derive the configured account, or `index` when a script takes one explicitly.
    pub fn account(&self, index: Option<u32>) -> anyhow::Result<Account> {
        let index = index.unwrap_or(self.account_index);
        Ok(derive_child_account(self.network, self.mnemonic()?, index)?)
    }

    pub fn node(&self) -> HiroClient {
        HiroClient::new(self.network, self.api_url())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("network", &self.network)
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .field("account_index", &self.account_index)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Read a required environment variable; unset and empty are both missing.
pub fn require_env(name: &'static str) -> Result<String, ScriptError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ScriptError::MissingEnv(name)),
    }
}

pub fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
