use anyhow::Context;
use stacks_intent_encoder::{encoder::unsigned_length, sign_intent, SignedTransaction, TransactionIntent};

use crate::{
    account::Account,
    error::ScriptError,
    node::{BroadcastResult, StacksNode},
};

/// Lowest fee the scripts will attach when estimating, in micro-STX.
pub const MIN_FEE: u64 = 180;

/// Submit a signed transaction; a node rejection becomes [`ScriptError::Rejected`].
pub async fn broadcast_tx(node: &dyn StacksNode, tx: &SignedTransaction) -> Result<BroadcastResult, ScriptError> {
    let result = node.broadcast(tx).await?;
    if !result.success {
        log::warn!("broadcast of {} rejected: {:?}", result.txid, result.error);
        return Err(ScriptError::Rejected {
            txid: result.txid,
            error: result.error.unwrap_or_else(|| "unknown error".to_string()),
            reason: result.reason,
            reason_data: result.reason_data,
        });
    }
    log::info!("broadcast {}", result.txid);
    Ok(result)
}

/// Sign `intent` with the account key and broadcast it.
pub async fn sign_and_broadcast(
    node: &dyn StacksNode,
    account: &Account,
    intent: TransactionIntent,
) -> anyhow::Result<BroadcastResult> {
    let tx = sign_intent(intent, account.signing_key()).context("failed to sign transaction")?;
    Ok(broadcast_tx(node, &tx).await?)
}

/// `fee_rate * serialized length`, never below [`MIN_FEE`].
pub async fn estimate_fee(node: &dyn StacksNode, intent: &TransactionIntent) -> anyhow::Result<u64> {
    let rate = node.fee_rate().await.context("failed to fetch fee rate")?;
    let length = unsigned_length(intent).context("failed to serialize transaction")? as u64;
    let fee = rate.saturating_mul(length).max(MIN_FEE);
    log::debug!("estimated fee {fee} (rate {rate} x {length} bytes)");
    Ok(fee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{account::derive_child_account, mock::MockStacksNode};
    use stacks_intent_encoder::ContractCallBuilder;
    use stacks_intent_types::{ClarityValue, Network};

    const ABANDON_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn intent() -> TransactionIntent {
        let contract = "ST35K818S3K2GSNEBC3M35GA3W8Q7X72KF4RVM3QA.wed-core-proposals".parse().unwrap();
        ContractCallBuilder::new(Network::Testnet, contract, "conclude-proposal")
            .arg(ClarityValue::uint(1u64))
            .build()
    }

    #[tokio::test]
    async fn fee_has_a_floor() {
        let mut node = MockStacksNode::new(Network::Testnet);
        node.fee_rate = 0;
        assert_eq!(estimate_fee(&node, &intent()).await.unwrap(), MIN_FEE);

        node.fee_rate = 10;
        let length = unsigned_length(&intent()).unwrap() as u64;
        assert_eq!(estimate_fee(&node, &intent()).await.unwrap(), 10 * length);
    }

    #[tokio::test]
    async fn rejection_is_an_error() {
        let node = MockStacksNode::new(Network::Testnet).rejecting("transaction rejected", "NotEnoughFunds");
        let account = derive_child_account(Network::Testnet, ABANDON_MNEMONIC, 0).unwrap();
        let err = sign_and_broadcast(&node, &account, intent()).await.unwrap_err();
        let script_err = err.downcast_ref::<ScriptError>().unwrap();
        assert!(matches!(script_err, ScriptError::Rejected { reason: Some(r), .. } if r == "NotEnoughFunds"));
        assert_eq!(err.to_string(), "transaction rejected: transaction rejected (NotEnoughFunds)");
    }

    #[tokio::test]
    async fn accepted_returns_txid() {
        let node = MockStacksNode::new(Network::Testnet);
        let account = derive_child_account(Network::Testnet, ABANDON_MNEMONIC, 0).unwrap();
        let result = sign_and_broadcast(&node, &account, intent()).await.unwrap();
        assert!(result.success);
        assert_eq!(result.txid, node.broadcasts()[0].txid_hex());
    }
}
