//! In-memory node for exercising script flows without a network.

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use stacks_intent_encoder::SignedTransaction;
use stacks_intent_types::{ClarityValue, ContractId, Network, StacksAddress};

use crate::{
    error::ApiError,
    node::{BroadcastResult, StacksNode},
};

/// Node with canned read-only results, keyed by function name, that records every
/// transaction it is asked to broadcast.
pub struct MockStacksNode {
    pub network: Network,
    pub nonce: u64,
    pub fee_rate: u64,
    pub read_only: HashMap<String, ClarityValue>,
    /// When set, broadcasts are rejected with this error/reason.
    pub reject_with: Option<(String, String)>,
    broadcasts: Mutex<Vec<SignedTransaction>>,
    read_only_calls: Mutex<Vec<(ContractId, String)>>,
}

impl MockStacksNode {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            nonce: 0,
            fee_rate: 1,
            read_only: HashMap::new(),
            reject_with: None,
            broadcasts: Mutex::new(Vec::new()),
            read_only_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn with_read_only(mut self, function: &str, result: ClarityValue) -> Self {
        self.read_only.insert(function.to_string(), result);
        self
    }

    pub fn rejecting(mut self, error: &str, reason: &str) -> Self {
        self.reject_with = Some((error.to_string(), reason.to_string()));
        self
    }

    pub fn broadcasts(&self) -> Vec<SignedTransaction> {
        self.broadcasts.lock().map(|b| b.clone()).unwrap_or_default()
    }

    pub fn read_only_calls(&self) -> Vec<(ContractId, String)> {
        self.read_only_calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl StacksNode for MockStacksNode {
    fn network(&self) -> Network {
        self.network
    }

    async fn next_nonce(&self, _address: &StacksAddress) -> Result<u64, ApiError> {
        Ok(self.nonce)
    }

    async fn account_nonce(&self, _address: &StacksAddress) -> Result<u64, ApiError> {
        Ok(self.nonce)
    }

    async fn fee_rate(&self) -> Result<u64, ApiError> {
        Ok(self.fee_rate)
    }

    async fn call_read_only(
        &self,
        contract: &ContractId,
        function: &str,
        _args: &[ClarityValue],
        _sender: &StacksAddress,
    ) -> Result<ClarityValue, ApiError> {
        if let Ok(mut calls) = self.read_only_calls.lock() {
            calls.push((contract.clone(), function.to_string()));
        }
        self.read_only
            .get(function)
            .cloned()
            .ok_or_else(|| ApiError::ReadOnly(format!("no result for {contract}::{function}")))
    }

    async fn broadcast(&self, tx: &SignedTransaction) -> Result<BroadcastResult, ApiError> {
        if let Ok(mut broadcasts) = self.broadcasts.lock() {
            broadcasts.push(tx.clone());
        }
        Ok(match &self.reject_with {
            Some((error, reason)) => BroadcastResult {
                txid: tx.txid_hex(),
                success: false,
                error: Some(error.clone()),
                reason: Some(reason.clone()),
                reason_data: None,
            },
            None => BroadcastResult::accepted(tx.txid_hex()),
        })
    }
}
