use anyhow::Context;
use reqwest::Client;
use serde_json::Value;
use stacks_intent_types::{Network, StacksAddress};

use crate::{account::Account, error::ApiError, response::ToolResponse};

pub const DEFAULT_JING_API_URL: &str = "https://backend-neon-ecru.vercel.app/api";
pub const DEFAULT_JING_API_KEY: &str = "dev-api-token";

/// Client for the Jing order-book backend.
pub struct JingClient {
    api_url: String,
    api_key: String,
    http: Client,
}

impl JingClient {
    pub fn new(api_url: &str, api_key: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http: Client::new(),
        }
    }

    pub fn order_book_url(&self, pair: &str) -> String {
        format!("{}/token-pairs/{pair}/order-book", self.api_url)
    }

    pub async fn get_order_book(&self, pair: &str, address: &StacksAddress, network: Network) -> Result<Value, ApiError> {
        let url = self.order_book_url(pair);
        log::debug!("GET {url}");
        let resp = self
            .http
            .get(&url)
            .header("x-api-key", &self.api_key)
            .query(&[("address", address.to_string()), ("network", network.to_string())])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status { url, status: status.as_u16(), body });
        }
        Ok(resp.json().await?)
    }
}

/// Print the order book of `pair` as seen by `account`.
pub async fn get_market(client: &JingClient, account: &Account, pair: &str) -> anyhow::Result<ToolResponse<Value>> {
    let order_book = client
        .get_order_book(pair, &account.address, account.network)
        .await
        .with_context(|| format!("failed to fetch order book for {pair}"))?;
    println!("{}", serde_json::to_string_pretty(&order_book)?);
    Ok(ToolResponse::ok(format!("Order book for {pair}"), order_book))
}
