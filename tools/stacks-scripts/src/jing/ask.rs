use anyhow::{anyhow, Context};
use stacks_intent_encoder::{AnchorMode, ContractCallBuilder, PostConditionMode, TransactionIntent};
use stacks_intent_types::{ClarityValue, ContractId, FungibleConditionCode, PostCondition, StacksAddress};

use super::pairs::{calculate_ask_fees, get_token_decimals, get_token_info, JingContracts, TokenInfo};
use crate::{
    account::Account,
    broadcast::sign_and_broadcast,
    error::ScriptError,
    node::StacksNode,
    response::ToolResponse,
    units::{ask_price_in_stx, display_value, micro_stx_to_stx},
};

/// Network fee for `cancel`, in micro-STX.
pub const CANCEL_FEE: u64 = 10_000;
/// Network fee for `submit-swap`, in micro-STX.
pub const SUBMIT_FEE: u64 = 30_000;

/// An open ask as recorded by the ask contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AskDetails {
    pub ustx: u128,
    pub amount: u128,
    pub ft_sender: Option<String>,
    pub ft: Option<String>,
}

/// Read `get-swap` for `swap_id`. Both `(ok (tuple ...))` and `(some (tuple ...))` are accepted.
pub async fn get_ask_details(
    node: &dyn StacksNode,
    ask_contract: &ContractId,
    swap_id: u64,
    sender: &StacksAddress,
) -> anyhow::Result<AskDetails> {
    let result = node
        .call_read_only(ask_contract, "get-swap", &[ClarityValue::uint(swap_id)], sender)
        .await
        .context("Failed to get ask details")?;
    parse_ask_details(&result).ok_or_else(|| anyhow!("Failed to get ask details"))
}

fn parse_ask_details(result: &ClarityValue) -> Option<AskDetails> {
    let swap = result.success_value()?;
    Some(AskDetails {
        ustx: swap.get("ustx")?.as_uint()?,
        amount: swap.get("amount")?.as_uint()?,
        ft_sender: swap.get("ft-sender").and_then(ClarityValue::as_principal),
        ft: swap.get("ft").and_then(ClarityValue::as_principal),
    })
}

/// Only the maker of an ask may cancel it.
pub fn ensure_ask_owner(details: &AskDetails, address: &StacksAddress) -> Result<(), ScriptError> {
    let owner = details.ft_sender.as_deref().unwrap_or("unknown");
    if owner != address.to_string() {
        return Err(ScriptError::Unauthorized(format!(
            "Only the ask creator ({owner}) can cancel this ask"
        )));
    }
    Ok(())
}

fn to_amount(value: u128, what: &str) -> Result<u64, ScriptError> {
    u64::try_from(value).map_err(|_| ScriptError::validation(format!("{what} {value} does not fit in a post-condition")))
}

/// Cancelling returns the escrowed tokens from the ask contract and up to `fees` from YANG.
pub fn cancel_post_conditions(
    contracts: &JingContracts,
    token: &TokenInfo,
    amount: u128,
    fees: u128,
) -> Result<Vec<PostCondition>, ScriptError> {
    Ok(vec![
        PostCondition::contract_fungible(
            contracts.yang.clone(),
            FungibleConditionCode::LessEqual,
            to_amount(fees, "fee")?,
            token.asset.clone(),
        ),
        PostCondition::contract_fungible(
            contracts.ask.clone(),
            FungibleConditionCode::Equal,
            to_amount(amount, "amount")?,
            token.asset.clone(),
        ),
    ])
}

/// Filling an ask: the taker pays exactly `ustx`, the ask contract releases exactly
/// `amount` tokens and YANG releases at most `fees`.
pub fn submit_post_conditions(
    contracts: &JingContracts,
    token: &TokenInfo,
    taker: StacksAddress,
    ustx: u128,
    amount: u128,
    fees: u128,
) -> Result<Vec<PostCondition>, ScriptError> {
    Ok(vec![
        PostCondition::standard_stx(taker, FungibleConditionCode::Equal, to_amount(ustx, "ustx")?),
        PostCondition::contract_fungible(
            contracts.ask.clone(),
            FungibleConditionCode::Equal,
            to_amount(amount, "amount")?,
            token.asset.clone(),
        ),
        PostCondition::contract_fungible(
            contracts.yang.clone(),
            FungibleConditionCode::LessEqual,
            to_amount(fees, "fee")?,
            token.asset.clone(),
        ),
    ])
}

fn swap_call(
    account: &Account,
    contracts: &JingContracts,
    token: &TokenInfo,
    function: &str,
    swap_id: u64,
) -> ContractCallBuilder {
    ContractCallBuilder::new(account.network, contracts.ask.clone(), function)
        .arg(ClarityValue::uint(swap_id))
        .arg(ClarityValue::contract_principal(token.contract.clone()))
        .arg(ClarityValue::contract_principal(contracts.yang.clone()))
        .anchor_mode(AnchorMode::Any)
        .post_condition_mode(PostConditionMode::Deny)
}

/// Build the `cancel` intent after checking that `account` made the ask.
pub fn build_cancel_intent(
    account: &Account,
    contracts: &JingContracts,
    token: &TokenInfo,
    swap_id: u64,
    details: &AskDetails,
    nonce: u64,
) -> Result<TransactionIntent, ScriptError> {
    ensure_ask_owner(details, &account.address)?;
    let fees = calculate_ask_fees(details.amount);
    let post_conditions = cancel_post_conditions(contracts, token, details.amount, fees)?;
    Ok(swap_call(account, contracts, token, "cancel", swap_id)
        .post_conditions(post_conditions)
        .nonce(nonce)
        .fee(CANCEL_FEE)
        .build())
}

pub fn build_submit_intent(
    account: &Account,
    contracts: &JingContracts,
    token: &TokenInfo,
    swap_id: u64,
    details: &AskDetails,
    nonce: u64,
) -> Result<TransactionIntent, ScriptError> {
    let fees = calculate_ask_fees(details.amount);
    let post_conditions =
        submit_post_conditions(contracts, token, account.address, details.ustx, details.amount, fees)?;
    Ok(swap_call(account, contracts, token, "submit-swap", swap_id)
        .post_conditions(post_conditions)
        .nonce(nonce)
        .fee(SUBMIT_FEE)
        .build())
}

/// Cancel an open ask made by `account` and broadcast the transaction.
pub async fn cancel_ask(
    node: &dyn StacksNode,
    account: &Account,
    swap_id: u64,
    pair: &str,
) -> anyhow::Result<ToolResponse<String>> {
    let token = get_token_info(pair)?;
    let contracts = JingContracts::mainnet()?;
    let decimals = get_token_decimals(node, &token, &account.address).await?;
    let nonce = node.next_nonce(&account.address).await.context("failed to fetch nonce")?;
    let symbol = &token.symbol;

    println!("Preparing to cancel ask {swap_id} from account {}", account.address);

    let details = get_ask_details(node, &contracts.ask, swap_id, &account.address).await?;
    let fees = calculate_ask_fees(details.amount);

    println!("\nAsk details:");
    println!("- Creator: {}", details.ft_sender.as_deref().unwrap_or("unknown"));
    println!("- Token decimals: {decimals}");
    println!("- Amount: {} {symbol} ({} μ{symbol})", display_value(details.amount, decimals), details.amount);
    println!("- STX price: {} STX ({} μSTX)", micro_stx_to_stx(details.ustx), details.ustx);
    if let Some(price) = ask_price_in_stx(details.ustx, details.amount, decimals) {
        println!("- Price per {symbol}: {price:.8} STX");
    }
    println!("- Refundable fees: {} {symbol} ({fees} μ{symbol})", display_value(fees, decimals));
    println!("- Gas fee: {} STX ({CANCEL_FEE} μSTX)", micro_stx_to_stx(CANCEL_FEE as u128));

    let intent = match build_cancel_intent(account, &contracts, &token, swap_id, &details, nonce) {
        Ok(intent) => intent,
        Err(e @ ScriptError::Unauthorized(_)) => {
            println!("\nError: Cannot cancel ask");
            println!("- Your address: {}", account.address);
            println!("- Required address: {}", details.ft_sender.as_deref().unwrap_or("unknown"));
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    println!("\nPost Conditions:");
    println!("- Contract returns: {} {symbol}", display_value(details.amount, decimals));
    println!("- YANG contract returns up to: {} {symbol}", display_value(fees, decimals));

    let result = sign_and_broadcast(node, account, intent)
        .await
        .context("Error cancelling ask")?;
    println!("Transaction broadcast successfully!");
    println!("Transaction ID: {}", result.txid);
    println!("Monitor status at: {}", account.network.explorer_tx_url(&result.txid));

    Ok(ToolResponse::ok(format!("Cancelled ask {swap_id}"), result.txid))
}

/// Fill an open ask: pay its STX price and receive its tokens.
pub async fn submit_ask(
    node: &dyn StacksNode,
    account: &Account,
    swap_id: u64,
    pair: &str,
) -> anyhow::Result<ToolResponse<String>> {
    let token = get_token_info(pair)?;
    let contracts = JingContracts::mainnet()?;
    let decimals = get_token_decimals(node, &token, &account.address).await?;
    let nonce = node.next_nonce(&account.address).await.context("failed to fetch nonce")?;
    let symbol = &token.symbol;

    let details = get_ask_details(node, &contracts.ask, swap_id, &account.address).await?;
    if details.ft.as_deref().is_some_and(|ft| ft != token.contract.to_string()) {
        log::warn!("ask {swap_id} trades {:?}, not {}", details.ft, token.contract);
    }
    let fees = calculate_ask_fees(details.amount);
    let intent = build_submit_intent(account, &contracts, &token, swap_id, &details, nonce)?;

    println!("Creating contract call...");
    println!("\nSubmitting swap for ask {swap_id}:");
    println!("\nSwap Details:");
    println!("- Token decimals: {decimals}");
    println!("- You send: {} STX ({} μSTX)", micro_stx_to_stx(details.ustx), details.ustx);
    println!("- You receive: {} {symbol} ({} μ{symbol})", display_value(details.amount, decimals), details.amount);
    println!("- Token fee: {} {symbol} ({fees} μ{symbol}) from YANG contract", display_value(fees, decimals));
    println!("- Network fee: {} STX ({SUBMIT_FEE} μSTX)", micro_stx_to_stx(SUBMIT_FEE as u128));
    if let Some(price) = ask_price_in_stx(details.ustx, details.amount, decimals) {
        println!("- Price per {symbol}: {price:.8} STX");
    }
    println!("\nPost Conditions:");
    println!("- Your STX transfer: {} μSTX", details.ustx);
    println!("- Contract token transfer: {} μ{symbol}", details.amount);
    println!("- Maximum fees: {fees} μ{symbol}");

    println!("\nBroadcasting transaction...");
    let result = sign_and_broadcast(node, account, intent)
        .await
        .context("Error submitting swap")?;
    println!("Transaction broadcast successfully!");
    println!("Transaction ID: {}", result.txid);
    println!("Monitor status at: {}", account.network.explorer_tx_url(&result.txid));

    Ok(ToolResponse::ok(format!("Submitted swap for ask {swap_id}"), result.txid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{account::derive_child_account, mock::MockStacksNode};
    use stacks_intent_types::{Network, PostConditionPrincipal};

    const DEVNET_MNEMONIC: &str = "twice kind fence tip hidden tilt action fragile skin nothing glory cousin \
                                   green tomorrow spring wrist shed math olympic multiply hip blue scout claw";
    const OTHER_MAKER: &str = "ST35K818S3K2GSNEBC3M35GA3W8Q7X72KF4RVM3QA";
    const PEPE: &str = "SP1Z92MPDQEWZXW36VX71Q25HKF5K2EPCJ304F275.tokensoft-token-v4k68639zxz";

    fn account() -> Account {
        derive_child_account(Network::Testnet, DEVNET_MNEMONIC, 0).unwrap()
    }

    fn swap(ft_sender: &str, wrap_some: bool) -> ClarityValue {
        let tuple = ClarityValue::tuple([
            ("ustx", ClarityValue::uint(5_000_000u64)),
            ("amount", ClarityValue::uint(1_000_000u64)),
            ("ft-sender", ClarityValue::principal(ft_sender).unwrap()),
            ("ft", ClarityValue::principal(PEPE).unwrap()),
            ("open", ClarityValue::Bool(true)),
        ]);
        if wrap_some {
            ClarityValue::some(tuple)
        } else {
            ClarityValue::ok(tuple)
        }
    }

    fn node_with_owner(owner: &str) -> MockStacksNode {
        MockStacksNode::new(Network::Testnet)
            .with_nonce(7)
            .with_read_only("get-decimals", ClarityValue::ok(ClarityValue::uint(3u64)))
            .with_read_only("get-swap", swap(owner, true))
    }

    #[test]
    fn parses_both_swap_shapes() {
        let from_ok = parse_ask_details(&swap(OTHER_MAKER, false)).unwrap();
        let from_some = parse_ask_details(&swap(OTHER_MAKER, true)).unwrap();
        assert_eq!(from_ok, from_some);
        assert_eq!(from_ok.ustx, 5_000_000);
        assert_eq!(from_ok.ft_sender.as_deref(), Some(OTHER_MAKER));
        assert_eq!(from_ok.ft.as_deref(), Some(PEPE));

        assert_eq!(parse_ask_details(&ClarityValue::none()), None);
        assert_eq!(parse_ask_details(&ClarityValue::err(ClarityValue::uint(404u64))), None);
    }

    #[tokio::test]
    async fn cancel_by_owner_broadcasts_two_post_conditions() {
        let account = account();
        let node = node_with_owner(&account.address.to_string());

        let response = cancel_ask(&node, &account, 10, "PEPE-STX").await.unwrap();

        let broadcasts = node.broadcasts();
        assert_eq!(broadcasts.len(), 1);
        let intent = broadcasts[0].intent();
        assert_eq!(intent.function_name(), "cancel");
        assert_eq!(intent.fee(), CANCEL_FEE);
        assert_eq!(intent.nonce(), 7);
        assert_eq!(intent.post_condition_mode(), PostConditionMode::Deny);
        assert_eq!(intent.anchor_mode(), AnchorMode::Any);
        assert_eq!(intent.function_args()[0], ClarityValue::uint(10u64));

        let pcs = intent.post_conditions();
        assert_eq!(pcs.len(), 2);
        let contracts = JingContracts::mainnet().unwrap();
        assert_eq!(pcs[0].principal(), &PostConditionPrincipal::Contract(contracts.yang.clone()));
        assert_eq!(pcs[0].code(), FungibleConditionCode::LessEqual);
        assert_eq!(pcs[0].amount(), 2_500);
        assert_eq!(pcs[1].principal(), &PostConditionPrincipal::Contract(contracts.ask.clone()));
        assert_eq!(pcs[1].code(), FungibleConditionCode::Equal);
        assert_eq!(pcs[1].amount(), 1_000_000);

        assert!(response.success);
        assert_eq!(response.data.as_deref(), Some(broadcasts[0].txid_hex().as_str()));
    }

    #[tokio::test]
    async fn cancel_by_stranger_is_refused_before_broadcast() {
        let account = account();
        let node = node_with_owner(OTHER_MAKER);

        let err = cancel_ask(&node, &account, 10, "PEPE-STX").await.unwrap_err();
        assert!(matches!(err.downcast_ref::<ScriptError>(), Some(ScriptError::Unauthorized(_))));
        assert_eq!(err.to_string(), format!("Only the ask creator ({OTHER_MAKER}) can cancel this ask"));
        assert!(node.broadcasts().is_empty());
    }

    #[test]
    fn ownership_is_checked_before_post_conditions() {
        let account = account();
        let contracts = JingContracts::mainnet().unwrap();
        let token = get_token_info("PEPE-STX").unwrap();
        // an amount no post-condition can hold; the ownership error must win
        let details = AskDetails {
            ustx: 1,
            amount: u128::MAX,
            ft_sender: Some(OTHER_MAKER.to_string()),
            ft: None,
        };
        let err = build_cancel_intent(&account, &contracts, &token, 1, &details, 0).unwrap_err();
        assert!(matches!(err, ScriptError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn unknown_pair_fails_without_node_calls() {
        let account = account();
        let node = node_with_owner(&account.address.to_string());
        let err = cancel_ask(&node, &account, 10, "DOGE-STX").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to get token info for pair: DOGE-STX");
        assert!(node.read_only_calls().is_empty());
    }

    #[tokio::test]
    async fn submit_pays_exact_stx_and_caps_fees() {
        let account = account();
        let node = node_with_owner(OTHER_MAKER).with_nonce(2);

        submit_ask(&node, &account, 12, "PEPE-STX").await.unwrap();

        let broadcasts = node.broadcasts();
        let intent = broadcasts[0].intent();
        assert_eq!(intent.function_name(), "submit-swap");
        assert_eq!(intent.fee(), SUBMIT_FEE);
        let pcs = intent.post_conditions();
        assert_eq!(pcs.len(), 3);
        assert_eq!(pcs[0].principal(), &PostConditionPrincipal::Standard(account.address));
        assert_eq!(pcs[0].amount(), 5_000_000);
        assert_eq!(pcs[1].amount(), 1_000_000);
        assert_eq!(pcs[2].code(), FungibleConditionCode::LessEqual);
        assert_eq!(pcs[2].amount(), 2_500);
    }

    #[tokio::test]
    async fn missing_swap_reports_failure() {
        let account = account();
        let node = MockStacksNode::new(Network::Testnet)
            .with_read_only("get-decimals", ClarityValue::ok(ClarityValue::uint(3u64)))
            .with_read_only("get-swap", ClarityValue::none());
        let err = submit_ask(&node, &account, 99, "PEPE-STX").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to get ask details");
        assert!(node.broadcasts().is_empty());
    }
}
