use anyhow::Context;
use stacks_intent_encoder::{AnchorMode, ContractCallBuilder, PostConditionMode};
use stacks_intent_types::{ClarityValue, ContractId};

use crate::{account::Account, broadcast::sign_and_broadcast, node::StacksNode, response::ToolResponse};

/// 0.25 STX.
pub const FAUCET_FEE: u64 = 250_000;
pub const FAUCET_FUNCTION: &str = "faucet-flood";
/// Testnet aiBTC token; overridden by an argument or `AIBTC_TOKEN_CONTRACT`.
pub const DEFAULT_TOKEN_CONTRACT: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.aibtc-token";

/// Request a flood of tokens from the faucet to `account`.
pub async fn faucet_flood(
    node: &dyn StacksNode,
    account: &Account,
    token: &ContractId,
) -> anyhow::Result<ToolResponse<String>> {
    let nonce = node.next_nonce(&account.address).await.context("failed to fetch nonce")?;
    let intent = ContractCallBuilder::new(account.network, token.clone(), FAUCET_FUNCTION)
        .arg(ClarityValue::standard_principal(account.address))
        .fee(FAUCET_FEE)
        .nonce(nonce)
        .anchor_mode(AnchorMode::Any)
        .post_condition_mode(PostConditionMode::Deny)
        .build();

    let result = sign_and_broadcast(node, account, intent).await?;
    println!("Transaction broadcasted successfully!");
    println!("FROM: {}", account.address);
    println!("TXID: 0x{}", result.txid);
    Ok(ToolResponse::ok(format!("Faucet flood requested for {}", account.address), result.txid))
}
