use anyhow::{anyhow, Context};
use serde_json::Value;
use stacks_intent_encoder::{cv_to_json, encode_clarity_value, AnchorMode, ContractCallBuilder, PostConditionMode};
use stacks_intent_types::{ClarityValue, ContractId, StacksAddress};

use crate::{
    account::Account,
    broadcast::{estimate_fee, sign_and_broadcast},
    error::ScriptError,
    node::{BroadcastResult, StacksNode},
    response::ToolResponse,
};

/// Resource offered through the DAO's payments extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceProposal {
    pub extension: ContractId,
    pub action: ContractId,
    pub name: String,
    pub description: String,
    /// Zero is a valid price.
    pub price: u128,
    pub url: Option<String>,
}

impl ResourceProposal {
    /// Both contracts must be `address.name`.
    pub fn parse(
        extension: &str,
        action: &str,
        name: &str,
        description: &str,
        price: u128,
        url: Option<&str>,
    ) -> Result<Self, ScriptError> {
        let invalid = || ScriptError::validation(format!("Invalid contract addresses: {extension} {action}"));
        Ok(Self {
            extension: extension.parse::<ContractId>().map_err(|_| invalid())?,
            action: action.parse::<ContractId>().map_err(|_| invalid())?,
            name: name.to_string(),
            description: description.to_string(),
            price,
            url: url.filter(|u| !u.is_empty()).map(str::to_string),
        })
    }

    /// Parameters tuple the action contract decodes from its buffer argument.
    pub fn parameters(&self) -> ClarityValue {
        let url = match &self.url {
            Some(url) => ClarityValue::some(ClarityValue::string_utf8(url.clone())),
            None => ClarityValue::none(),
        };
        ClarityValue::tuple([
            ("name", ClarityValue::string_utf8(self.name.clone())),
            ("description", ClarityValue::string_utf8(self.description.clone())),
            ("price", ClarityValue::uint(self.price)),
            ("url", url),
        ])
    }
}

/// Propose the add-resource action through the action proposals extension.
pub async fn propose_action_add_resource(
    node: &dyn StacksNode,
    account: &Account,
    proposal: &ResourceProposal,
) -> anyhow::Result<ToolResponse<BroadcastResult>> {
    let params = encode_clarity_value(&proposal.parameters()).context("failed to serialize parameters")?;
    let nonce = node.next_nonce(&account.address).await.context("failed to fetch nonce")?;

    let intent = ContractCallBuilder::new(account.network, proposal.extension.clone(), "propose-action")
        .arg(ClarityValue::contract_principal(proposal.action.clone()))
        .arg(ClarityValue::buffer(params))
        .anchor_mode(AnchorMode::Any)
        .post_condition_mode(PostConditionMode::Deny)
        .nonce(nonce)
        .build();
    let fee = estimate_fee(node, &intent).await?;
    let result = sign_and_broadcast(node, account, intent.with_fee(fee)).await?;

    Ok(ToolResponse::ok(
        format!("Transaction broadcast successfully: 0x{}", result.txid),
        result,
    ))
}

/// Read `get-protocol-treasury` from a core proposals extension.
pub async fn get_protocol_treasury(
    node: &dyn StacksNode,
    contract: &ContractId,
    sender: &StacksAddress,
) -> anyhow::Result<ToolResponse<Value>> {
    let result = node
        .call_read_only(contract, "get-protocol-treasury", &[], sender)
        .await
        .with_context(|| format!("failed to read protocol treasury of {contract}"))?;
    match result {
        ClarityValue::OptionalNone => Ok(ToolResponse::message(
            "Contract has not been initialized with a treasury contract",
        )),
        ClarityValue::OptionalSome(_) => {
            let json = cv_to_json(&result);
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(ToolResponse::ok("Protocol treasury found", json))
        }
        other => Err(anyhow!("unexpected get-protocol-treasury result: {other}")),
    }
}
