use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ADDRESS_VERSION_MAINNET_SINGLESIG: u8 = 22;
pub const ADDRESS_VERSION_MAINNET_MULTISIG: u8 = 20;
pub const ADDRESS_VERSION_TESTNET_SINGLESIG: u8 = 26;
pub const ADDRESS_VERSION_TESTNET_MULTISIG: u8 = 21;

/// Stacks network a script targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown network `{0}`, expected one of: mainnet, testnet, devnet")]
pub struct NetworkParseError(pub String);

impl Network {
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
        }
    }

    pub fn is_mainnet(self) -> bool {
        self == Network::Mainnet
    }

    /// Leading byte of a serialized transaction.
    pub fn transaction_version(self) -> u8 {
        if self.is_mainnet() {
            0x00
        } else {
            0x80
        }
    }

    pub fn chain_id(self) -> u32 {
        if self.is_mainnet() {
            0x0000_0001
        } else {
            0x8000_0000
        }
    }

    /// Version byte for single-sig (P2PKH) addresses: `SP…` on mainnet, `ST…` elsewhere.
    pub fn single_sig_version(self) -> u8 {
        if self.is_mainnet() {
            ADDRESS_VERSION_MAINNET_SINGLESIG
        } else {
            ADDRESS_VERSION_TESTNET_SINGLESIG
        }
    }

    pub fn default_api_url(self) -> &'static str {
        match self {
            Network::Mainnet => "https://api.mainnet.hiro.so",
            Network::Testnet => "https://api.testnet.hiro.so",
            Network::Devnet => "http://localhost:3999",
        }
    }

    pub fn explorer_tx_url(self, txid: &str) -> String {
        let txid = txid.trim_start_matches("0x");
        match self {
            Network::Mainnet => format!("https://explorer.hiro.so/txid/0x{txid}?chain=mainnet"),
            Network::Testnet => format!("https://explorer.hiro.so/txid/0x{txid}?chain=testnet"),
            Network::Devnet => format!(
                "https://explorer.hiro.so/txid/0x{txid}?chain=testnet&api=http://localhost:3999"
            ),
        }
    }
}

impl FromStr for Network {
    type Err = NetworkParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            other => Err(NetworkParseError(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
