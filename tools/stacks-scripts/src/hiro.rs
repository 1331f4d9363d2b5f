use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use stacks_intent_encoder::{decode_clarity_hex, encode_clarity_value, SignedTransaction};
use stacks_intent_types::{ClarityValue, ContractId, Network, StacksAddress};

use crate::{
    error::ApiError,
    node::{BroadcastResult, StacksNode},
};

/// [`StacksNode`] backed by the Hiro Stacks API (or any node exposing the same routes).
pub struct HiroClient {
    network: Network,
    base_url: String,
    http: Client,
}

#[derive(Deserialize)]
struct NoncesResponse {
    possible_next_nonce: u64,
}

#[derive(Deserialize)]
struct AccountResponse {
    nonce: u64,
}

#[derive(Deserialize)]
struct ReadOnlyResponse {
    okay: bool,
    result: Option<String>,
    cause: Option<String>,
}

#[derive(Deserialize)]
struct RejectionResponse {
    error: String,
    reason: Option<String>,
    reason_data: Option<Value>,
    txid: Option<String>,
}

impl HiroClient {
    pub fn new(network: Network, base_url: &str) -> Self {
        Self {
            network,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: String) -> Result<T, ApiError> {
        log::debug!("GET {url}");
        let resp = self.http.get(&url).send().await?;
        let resp = check_status(url, resp).await?;
        Ok(resp.json::<T>().await?)
    }
}

async fn check_status(url: String, resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Status { url, status: status.as_u16(), body })
}

#[async_trait]
impl StacksNode for HiroClient {
    fn network(&self) -> Network {
        self.network
    }

    async fn next_nonce(&self, address: &StacksAddress) -> Result<u64, ApiError> {
        let url = format!("{}/extended/v1/address/{address}/nonces", self.base_url);
        let nonces: NoncesResponse = self.get_json(url).await?;
        Ok(nonces.possible_next_nonce)
    }

    async fn account_nonce(&self, address: &StacksAddress) -> Result<u64, ApiError> {
        let url = format!("{}/v2/accounts/{address}?proof=0", self.base_url);
        let account: AccountResponse = self.get_json(url).await?;
        Ok(account.nonce)
    }

    async fn fee_rate(&self) -> Result<u64, ApiError> {
        self.get_json(format!("{}/v2/fees/transfer", self.base_url)).await
    }

    async fn call_read_only(
        &self,
        contract: &ContractId,
        function: &str,
        args: &[ClarityValue],
        sender: &StacksAddress,
    ) -> Result<ClarityValue, ApiError> {
        let url = format!(
            "{}/v2/contracts/call-read/{}/{}/{function}",
            self.base_url, contract.address, contract.name
        );
        let arguments = args
            .iter()
            .map(|arg| {
                encode_clarity_value(arg)
                    .map(|bytes| format!("0x{}", hex::encode(bytes)))
                    .map_err(|e| ApiError::Malformed(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("POST {url}");
        let resp = self
            .http
            .post(&url)
            .json(&json!({ "sender": sender.to_string(), "arguments": arguments }))
            .send()
            .await?;
        let body: ReadOnlyResponse = check_status(url, resp).await?.json().await?;

        if !body.okay {
            return Err(ApiError::ReadOnly(body.cause.unwrap_or_else(|| "unknown cause".to_string())));
        }
        let result = body
            .result
            .ok_or_else(|| ApiError::Malformed("read-only response has no result".to_string()))?;
        decode_clarity_hex(&result).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    async fn broadcast(&self, tx: &SignedTransaction) -> Result<BroadcastResult, ApiError> {
        let url = format!("{}/v2/transactions", self.base_url);
        log::debug!("POST {url} ({} bytes)", tx.as_bytes().len());
        let resp = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(tx.as_bytes().to_vec())
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await?;
        parse_broadcast_body(&url, status.as_u16(), &text, &tx.txid_hex())
    }
}

/// Success is a JSON string holding the txid; a rejection is an object with `error`.
fn parse_broadcast_body(url: &str, status: u16, text: &str, local_txid: &str) -> Result<BroadcastResult, ApiError> {
    if (200..300).contains(&status) {
        let txid: String = serde_json::from_str(text)
            .map_err(|_| ApiError::Malformed(format!("unexpected broadcast response: {text}")))?;
        return Ok(BroadcastResult::accepted(txid.trim_start_matches("0x")));
    }
    match serde_json::from_str::<RejectionResponse>(text) {
        Ok(rejection) => Ok(BroadcastResult {
            txid: rejection.txid.unwrap_or_else(|| local_txid.to_string()),
            success: false,
            error: Some(rejection.error),
            reason: rejection.reason,
            reason_data: rejection.reason_data,
        }),
        Err(_) => Err(ApiError::Status {
            url: url.to_string(),
            status,
            body: text.to_string(),
        }),
    }
}
