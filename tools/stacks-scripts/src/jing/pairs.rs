use anyhow::{anyhow, Context};
use regex::Regex;
use stacks_intent_types::{AssetInfo, ContractId, ParseContractIdError, StacksAddress};

use crate::{error::ScriptError, node::StacksNode};

pub const JING_DEPLOYER: &str = "SM26NBC8SFHNW4P1Y4DFH27974P56WN86C92HPEHH";
/// Asks: the maker escrows tokens and wants STX.
pub const ASK_CONTRACT_NAME: &str = "ft-stx-swap-v1";
/// Bids: the maker escrows STX and wants tokens.
pub const BID_CONTRACT_NAME: &str = "stx-ft-swap-v1";
/// Holds the maker fees of open asks.
pub const YANG_CONTRACT_NAME: &str = "yang";

/// Maker fee on asks in basis points (0.25 %).
pub const ASK_FEE_BPS: u128 = 25;

/// Deployed Jing contracts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JingContracts {
    pub ask: ContractId,
    pub bid: ContractId,
    pub yang: ContractId,
}

impl JingContracts {
    pub fn mainnet() -> Result<Self, ParseContractIdError> {
        Ok(Self {
            ask: ContractId::from_parts(JING_DEPLOYER, ASK_CONTRACT_NAME)?,
            bid: ContractId::from_parts(JING_DEPLOYER, BID_CONTRACT_NAME)?,
            yang: ContractId::from_parts(JING_DEPLOYER, YANG_CONTRACT_NAME)?,
        })
    }
}

/// SIP-010 token tradeable against STX on Jing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenInfo {
    pub symbol: String,
    pub contract: ContractId,
    pub asset: AssetInfo,
}

// (symbol, deployer, contract name, asset name)
const TOKENS: &[(&str, &str, &str, &str)] = &[
    ("PEPE", "SP1Z92MPDQEWZXW36VX71Q25HKF5K2EPCJ304F275", "tokensoft-token-v4k68639zxz", "tokensoft-token"),
    ("WELSH", "SP3NE50GEXFG9SZGTT51P40X2CKYSZ5CC4ZTZ7A2G", "welshcorgicoin-token", "welshcorgicoin"),
    ("LEO", "SP1AY6K3PQV5MRT6R4S671NWW2FRVPKM0BR162CT6", "leo-token", "leo"),
    ("ALEX", "SP3K8BC0PPEVCV7NZ6QSRWPQ2JE9E5B6N3PA0KBR9", "token-alex", "alex"),
];

/// Look up the token of a `<SYMBOL>-STX` pair (case-insensitive).
pub fn get_token_info(pair: &str) -> Result<TokenInfo, ScriptError> {
    let unknown = || ScriptError::validation(format!("Failed to get token info for pair: {pair}"));
    let pattern = Regex::new(r"^(?i)([a-z0-9]+)-stx$").map_err(|e| ScriptError::Other(e.into()))?;
    let symbol = pattern
        .captures(pair.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_ascii_uppercase())
        .ok_or_else(unknown)?;

    let (_, address, contract_name, asset_name) =
        TOKENS.iter().find(|(s, ..)| *s == symbol).ok_or_else(unknown)?;
    let contract = ContractId::from_parts(address, contract_name).map_err(|e| ScriptError::Other(e.into()))?;
    Ok(TokenInfo {
        symbol,
        asset: AssetInfo::new(contract.clone(), *asset_name),
        contract,
    })
}

pub fn calculate_ask_fees(amount: u128) -> u128 {
    amount.saturating_mul(ASK_FEE_BPS) / 10_000
}

/// `get-decimals` of the token contract; expects `(ok uN)`.
pub async fn get_token_decimals(
    node: &dyn StacksNode,
    token: &TokenInfo,
    sender: &StacksAddress,
) -> anyhow::Result<u32> {
    let result = node
        .call_read_only(&token.contract, "get-decimals", &[], sender)
        .await
        .with_context(|| format!("failed to read decimals of {}", token.contract))?;
    let decimals = result
        .success_value()
        .and_then(|v| v.as_uint())
        .ok_or_else(|| anyhow!("unexpected get-decimals result: {result}"))?;
    Ok(u32::try_from(decimals)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_pairs_resolve() {
        let pepe = get_token_info("PEPE-STX").unwrap();
        assert_eq!(pepe.symbol, "PEPE");
        assert_eq!(
            pepe.contract.to_string(),
            "SP1Z92MPDQEWZXW36VX71Q25HKF5K2EPCJ304F275.tokensoft-token-v4k68639zxz"
        );
        assert_eq!(pepe.asset.asset_name, "tokensoft-token");

        let welsh = get_token_info("welsh-stx").unwrap();
        assert_eq!(welsh.asset.to_string(), "SP3NE50GEXFG9SZGTT51P40X2CKYSZ5CC4ZTZ7A2G.welshcorgicoin-token::welshcorgicoin");
    }

    #[test]
    fn unknown_pairs_fail() {
        for pair in ["DOGE-STX", "PEPE-BTC", "PEPE", ""] {
            let err = get_token_info(pair).unwrap_err();
            assert_eq!(err.to_string(), format!("Failed to get token info for pair: {pair}"));
        }
    }

    #[test]
    fn ask_fees_are_quarter_percent_floored() {
        assert_eq!(calculate_ask_fees(1_000_000), 2_500);
        assert_eq!(calculate_ask_fees(399), 0);
        assert_eq!(calculate_ask_fees(400), 1);
    }

    #[test]
    fn contracts_share_deployer() {
        let contracts = JingContracts::mainnet().unwrap();
        assert_eq!(contracts.ask.address, contracts.yang.address);
        assert_eq!(contracts.ask.name, "ft-stx-swap-v1");
        assert_eq!(contracts.bid.name, "stx-ft-swap-v1");
    }
}
