use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stacks_intent_encoder::SignedTransaction;
use stacks_intent_types::{ClarityValue, ContractId, Network, StacksAddress};

use crate::error::ApiError;

/// Outcome of submitting a transaction to the node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BroadcastResult {
    pub txid: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_data: Option<Value>,
}

impl BroadcastResult {
    pub fn accepted(txid: impl Into<String>) -> Self {
        Self {
            txid: txid.into(),
            success: true,
            error: None,
            reason: None,
            reason_data: None,
        }
    }
}

/// Node RPC used by the scripts. The Hiro API client is the real implementation.
#[async_trait]
pub trait StacksNode: Send + Sync {
    fn network(&self) -> Network;

    /// Next nonce the mempool will accept for `address`.
    async fn next_nonce(&self, _address: &StacksAddress) -> Result<u64, ApiError> {
        Err(ApiError::NotSupported("next_nonce"))
    }

    /// Nonce of the last anchored state.
    async fn account_nonce(&self, _address: &StacksAddress) -> Result<u64, ApiError> {
        Err(ApiError::NotSupported("account_nonce"))
    }

    /// Fee rate in micro-STX per byte.
    async fn fee_rate(&self) -> Result<u64, ApiError> {
        Err(ApiError::NotSupported("fee_rate"))
    }

    async fn call_read_only(
        &self,
        _contract: &ContractId,
        _function: &str,
        _args: &[ClarityValue],
        _sender: &StacksAddress,
    ) -> Result<ClarityValue, ApiError> {
        Err(ApiError::NotSupported("call_read_only"))
    }

    async fn broadcast(&self, _tx: &SignedTransaction) -> Result<BroadcastResult, ApiError> {
        Err(ApiError::NotSupported("broadcast"))
    }
}
