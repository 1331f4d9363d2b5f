use std::{fmt, str::FromStr};

use anyhow::{anyhow, Context};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::{error::ApiError, error::ScriptError, response::ToolResponse};

pub const SUPPLY: u64 = 1_000_000_000;
pub const DIVISIBILITY: u8 = 6;
/// Fee rate offered to the etching service, in sat/vB.
pub const ETCH_FEE_RATE: u64 = 510;

pub const MAINNET_HOST: &str = "https://api.ordinalsbot.com";
pub const TESTNET_HOST: &str = "https://testnet-api.ordinalsbot.com";

/// Bitcoin network the rune is etched on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitcoinNetwork {
    Mainnet,
    Testnet,
}

impl BitcoinNetwork {
    pub fn default_host(self) -> &'static str {
        match self {
            BitcoinNetwork::Mainnet => MAINNET_HOST,
            BitcoinNetwork::Testnet => TESTNET_HOST,
        }
    }
}

impl FromStr for BitcoinNetwork {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(BitcoinNetwork::Mainnet),
            "testnet" => Ok(BitcoinNetwork::Testnet),
            _ => Err(ScriptError::validation("Network must be either 'testnet' or 'mainnet'")),
        }
    }
}

impl fmt::Display for BitcoinNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BitcoinNetwork::Mainnet => "mainnet",
            BitcoinNetwork::Testnet => "testnet",
        })
    }
}

/// Validated etching request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EtchRequest {
    pub rune_name: String,
    pub symbol: String,
    pub network: BitcoinNetwork,
}

/// Symbol first, then network. The rune name is passed to the etching service unchanged.
pub fn validate_etch_args(rune_name: &str, symbol: &str, network: &str) -> Result<EtchRequest, ScriptError> {
    if symbol.chars().count() != 1 {
        return Err(ScriptError::validation("Symbol must be a single character"));
    }
    let network: BitcoinNetwork = network.parse()?;
    Ok(EtchRequest {
        rune_name: rune_name.to_string(),
        symbol: symbol.to_string(),
        network,
    })
}

#[derive(Clone, Debug, Serialize)]
pub struct OrderFile {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(rename = "dataURL")]
    pub data_url: String,
}

impl OrderFile {
    /// One-byte placeholder inscription carried by every etch order.
    pub fn placeholder() -> Self {
        Self {
            name: "rune.txt".to_string(),
            size: 1,
            mime_type: "plain/text".to_string(),
            data_url: "data:plain/text;base64,YQ==".to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunesEtchOrder {
    pub files: Vec<OrderFile>,
    pub turbo: bool,
    pub rune: String,
    pub supply: u64,
    pub symbol: String,
    pub divisibility: u8,
    pub premine: u64,
    pub fee: u64,
    pub receive_address: String,
}

impl RunesEtchOrder {
    /// Full supply premined to `receive_address`.
    pub fn new(request: &EtchRequest, receive_address: &str) -> Self {
        Self {
            files: vec![OrderFile::placeholder()],
            turbo: true,
            rune: request.rune_name.clone(),
            supply: SUPPLY,
            symbol: request.symbol.clone(),
            divisibility: DIVISIBILITY,
            premine: SUPPLY,
            fee: ETCH_FEE_RATE,
            receive_address: receive_address.to_string(),
        }
    }
}

/// OrdinalsBot inscription API.
pub struct OrdinalsBotClient {
    host: String,
    api_key: String,
    http: Client,
}

impl OrdinalsBotClient {
    pub fn new(host: &str, api_key: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http: Client::new(),
        }
    }

    pub async fn create_runes_etch_order(&self, order: &RunesEtchOrder) -> Result<Value, ApiError> {
        let url = format!("{}/runes/etch", self.host);
        log::debug!("POST {url}");
        let resp = self.http.post(&url).header("x-api-key", &self.api_key).json(order).send().await?;
        read_json(url, resp).await
    }

    pub async fn get_order(&self, id: &str) -> Result<Value, ApiError> {
        let url = format!("{}/order", self.host);
        log::debug!("GET {url}?id={id}");
        let resp = self
            .http
            .get(&url)
            .header("x-api-key", &self.api_key)
            .query(&[("id", id)])
            .send()
            .await?;
        read_json(url, resp).await
    }
}

async fn read_json(url: String, resp: reqwest::Response) -> Result<Value, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status { url, status: status.as_u16(), body });
    }
    Ok(resp.json().await?)
}

/// The order id may come back as a string or a number.
fn order_id(response: &Value) -> Option<String> {
    let id = response.get("id")?;
    id.as_str().map(str::to_string).or_else(|| id.as_u64().map(|n| n.to_string()))
}

/// Place the etch order and report its initial status.
pub async fn etch_runes(
    client: &OrdinalsBotClient,
    request: &EtchRequest,
    receive_address: &str,
) -> anyhow::Result<ToolResponse<String>> {
    let order = RunesEtchOrder::new(request, receive_address);
    let response = client
        .create_runes_etch_order(&order)
        .await
        .context("failed to create rune order")?;
    let id = order_id(&response).ok_or_else(|| anyhow!("Failed to create rune order"))?;

    let status = client.get_order(&id).await.with_context(|| format!("failed to fetch order {id}"))?;
    let status = status.get("status").and_then(Value::as_str).unwrap_or("unknown");
    Ok(ToolResponse::ok(
        "Rune etched successfully",
        format!("Order ID: {id}, Status: {status}"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn symbol_must_be_one_character() {
        assert!(validate_etch_args("FAKTORY•TOKEN", "K", "testnet").is_ok());
        // one scalar, several bytes
        assert!(validate_etch_args("FAKTORY•TOKEN", "₿", "testnet").is_ok());
        for symbol in ["", "KK"] {
            let err = validate_etch_args("FAKTORY•TOKEN", symbol, "testnet").unwrap_err();
            assert_eq!(err.to_string(), "Symbol must be a single character");
        }
    }

    #[test]
    fn network_must_be_bitcoin_network() {
        let request = validate_etch_args("FAKTORY•TOKEN", "K", "mainnet").unwrap();
        assert_eq!(request.network, BitcoinNetwork::Mainnet);
        assert_eq!(request.network.default_host(), MAINNET_HOST);
        let err = validate_etch_args("FAKTORY•TOKEN", "K", "devnet").unwrap_err();
        assert_eq!(err.to_string(), "Network must be either 'testnet' or 'mainnet'");
    }

    #[test]
    fn rune_name_is_forwarded_unchanged() {
        let request = validate_etch_args("faktory token", "K", "mainnet").unwrap();
        assert_eq!(request.rune_name, "faktory token");
        let order = serde_json::to_value(RunesEtchOrder::new(&request, "bc1qexample")).unwrap();
        assert_eq!(order["rune"], "faktory token");
    }

    #[test]
    fn order_serializes_service_field_names() {
        let request = validate_etch_args("FAKTORY•TOKEN", "K", "testnet").unwrap();
        let order = serde_json::to_value(RunesEtchOrder::new(&request, "tb1qexample")).unwrap();
        assert_eq!(order["receiveAddress"], "tb1qexample");
        assert_eq!(order["supply"], 1_000_000_000u64);
        assert_eq!(order["premine"], 1_000_000_000u64);
        assert_eq!(order["divisibility"], 6);
        assert_eq!(order["fee"], 510);
        assert_eq!(order["turbo"], true);
        assert_eq!(order["files"][0]["type"], "plain/text");
        assert_eq!(order["files"][0]["dataURL"], "data:plain/text;base64,YQ==");
    }

    #[test]
    fn order_id_accepts_strings_and_numbers() {
        assert_eq!(order_id(&json!({ "id": "abc-123" })).as_deref(), Some("abc-123"));
        assert_eq!(order_id(&json!({ "id": 42 })).as_deref(), Some("42"));
        assert_eq!(order_id(&json!({ "status": "error" })), None);
    }
}
