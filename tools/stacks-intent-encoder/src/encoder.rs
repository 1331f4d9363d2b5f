use alloy_primitives::FixedBytes;
use k256::ecdsa::SigningKey;
use stacks_intent_types::{
    address::MAX_CONTRACT_NAME_LEN,
    hash::{hash160, sha512_256},
    AssetInfo, ClarityValue, ContractId, PostCondition, PostConditionPrincipal, StacksAddress,
};

use crate::types::{
    SignedTransaction, TransactionIntent, AUTH_TYPE_STANDARD, HASH_MODE_P2PKH, KEY_ENCODING_COMPRESSED,
    PAYLOAD_CONTRACT_CALL, POST_CONDITION_FUNGIBLE, POST_CONDITION_STX, PRINCIPAL_CONTRACT, PRINCIPAL_ORIGIN,
    PRINCIPAL_STANDARD,
};

/// Errors raised while serializing or signing an intent.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("function name `{0}` is not a valid Clarity name")]
    InvalidFunctionName(String),
    #[error("tuple key `{0}` is not a valid Clarity name")]
    InvalidTupleKey(String),
    #[error("asset name `{0}` is not a valid Clarity name")]
    InvalidAssetName(String),
    #[error("string-ascii value contains non-ascii characters")]
    NonAsciiString,
    #[error("{0} is too large to serialize")]
    TooLarge(&'static str),
    #[error("signing failed: {0}")]
    Signing(#[from] k256::ecdsa::Error),
}

/// Serialize a Clarity value into its consensus wire form.
pub fn encode_clarity_value(value: &ClarityValue) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    write_clarity_value(&mut buf, value)?;
    Ok(buf)
}

pub fn write_clarity_value(buf: &mut Vec<u8>, value: &ClarityValue) -> Result<(), EncodeError> {
    buf.push(value.type_tag() as u8);
    match value {
        ClarityValue::Int(v) => buf.extend_from_slice(&v.to_be_bytes()),
        ClarityValue::UInt(v) => buf.extend_from_slice(&v.to_be_bytes()),
        ClarityValue::Buffer(bytes) => write_len_prefixed(buf, bytes, "buffer")?,
        ClarityValue::Bool(_) | ClarityValue::OptionalNone => {}
        ClarityValue::StandardPrincipal(address) => write_address(buf, address),
        ClarityValue::ContractPrincipal(contract) => write_contract(buf, contract),
        ClarityValue::ResponseOk(inner) | ClarityValue::ResponseErr(inner) | ClarityValue::OptionalSome(inner) => {
            write_clarity_value(buf, inner)?
        }
        ClarityValue::List(items) => {
            write_u32_len(buf, items.len(), "list")?;
            for item in items {
                write_clarity_value(buf, item)?;
            }
        }
        ClarityValue::Tuple(members) => {
            write_u32_len(buf, members.len(), "tuple")?;
            // BTreeMap iteration is already the canonical key order.
            for (key, member) in members {
                if !is_clarity_name(key) {
                    return Err(EncodeError::InvalidTupleKey(key.clone()));
                }
                write_name(buf, key);
                write_clarity_value(buf, member)?;
            }
        }
        ClarityValue::StringAscii(s) => {
            if !s.is_ascii() {
                return Err(EncodeError::NonAsciiString);
            }
            write_len_prefixed(buf, s.as_bytes(), "string-ascii")?
        }
        ClarityValue::StringUtf8(s) => write_len_prefixed(buf, s.as_bytes(), "string-utf8")?,
    }
    Ok(())
}

/// Serialize a single post-condition.
pub fn encode_post_condition(condition: &PostCondition) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    write_post_condition(&mut buf, condition)?;
    Ok(buf)
}

fn write_post_condition(buf: &mut Vec<u8>, condition: &PostCondition) -> Result<(), EncodeError> {
    match condition {
        PostCondition::Stx { principal, code, amount } => {
            buf.push(POST_CONDITION_STX);
            write_post_condition_principal(buf, principal);
            buf.push(*code as u8);
            buf.extend_from_slice(&amount.to_be_bytes());
        }
        PostCondition::FungibleToken { principal, asset, code, amount } => {
            buf.push(POST_CONDITION_FUNGIBLE);
            write_post_condition_principal(buf, principal);
            write_asset_info(buf, asset)?;
            buf.push(*code as u8);
            buf.extend_from_slice(&amount.to_be_bytes());
        }
    }
    Ok(())
}

fn write_post_condition_principal(buf: &mut Vec<u8>, principal: &PostConditionPrincipal) {
    match principal {
        PostConditionPrincipal::Origin => buf.push(PRINCIPAL_ORIGIN),
        PostConditionPrincipal::Standard(address) => {
            buf.push(PRINCIPAL_STANDARD);
            write_address(buf, address);
        }
        PostConditionPrincipal::Contract(contract) => {
            buf.push(PRINCIPAL_CONTRACT);
            write_contract(buf, contract);
        }
    }
}

fn write_asset_info(buf: &mut Vec<u8>, asset: &AssetInfo) -> Result<(), EncodeError> {
    if !is_clarity_name(&asset.asset_name) {
        return Err(EncodeError::InvalidAssetName(asset.asset_name.clone()));
    }
    write_contract(buf, &asset.contract);
    write_name(buf, &asset.asset_name);
    Ok(())
}

fn write_address(buf: &mut Vec<u8>, address: &StacksAddress) {
    buf.push(address.version);
    buf.extend_from_slice(address.hash160.as_slice());
}

fn write_contract(buf: &mut Vec<u8>, contract: &ContractId) {
    write_address(buf, &contract.address);
    write_name(buf, &contract.name);
}

/// u8 length prefix; callers have already bounded the name to 128 bytes.
fn write_name(buf: &mut Vec<u8>, name: &str) {
    buf.push(name.len() as u8);
    buf.extend_from_slice(name.as_bytes());
}

fn write_u32_len(buf: &mut Vec<u8>, len: usize, what: &'static str) -> Result<(), EncodeError> {
    let len = u32::try_from(len).map_err(|_| EncodeError::TooLarge(what))?;
    buf.extend_from_slice(&len.to_be_bytes());
    Ok(())
}

fn write_len_prefixed(buf: &mut Vec<u8>, bytes: &[u8], what: &'static str) -> Result<(), EncodeError> {
    write_u32_len(buf, bytes.len(), what)?;
    buf.extend_from_slice(bytes);
    Ok(())
}

fn is_clarity_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic());
    starts_ok
        && name.len() <= MAX_CONTRACT_NAME_LEN
        && chars.all(|c| c.is_ascii_alphanumeric() || "-_!?+<>=/*".contains(c))
}

/// Contract-call payload: target contract, function name and serialized arguments.
pub fn encode_payload(intent: &TransactionIntent) -> Result<Vec<u8>, EncodeError> {
    let function_name = intent.function_name();
    if !is_clarity_name(function_name) {
        return Err(EncodeError::InvalidFunctionName(function_name.to_string()));
    }
    let mut buf = Vec::new();
    buf.push(PAYLOAD_CONTRACT_CALL);
    write_contract(&mut buf, intent.contract());
    write_name(&mut buf, function_name);
    write_u32_len(&mut buf, intent.function_args().len(), "argument list")?;
    for arg in intent.function_args() {
        write_clarity_value(&mut buf, arg)?;
    }
    Ok(buf)
}

/// Full transaction serialization for a given signer, nonce, fee and signature.
fn encode_transaction(
    intent: &TransactionIntent,
    signer: &[u8],
    nonce: u64,
    fee: u64,
    signature: &[u8; 65],
) -> Result<Vec<u8>, EncodeError> {
    let network = intent.network();
    let mut buf = Vec::with_capacity(256);

    buf.push(network.transaction_version());
    buf.extend_from_slice(&network.chain_id().to_be_bytes());

    // single-sig p2pkh spending condition
    buf.push(AUTH_TYPE_STANDARD);
    buf.push(HASH_MODE_P2PKH);
    buf.extend_from_slice(signer);
    buf.extend_from_slice(&nonce.to_be_bytes());
    buf.extend_from_slice(&fee.to_be_bytes());
    buf.push(KEY_ENCODING_COMPRESSED);
    buf.extend_from_slice(signature);

    buf.push(intent.anchor_mode() as u8);
    buf.push(intent.post_condition_mode() as u8);
    write_u32_len(&mut buf, intent.post_conditions().len(), "post-condition list")?;
    for condition in intent.post_conditions() {
        write_post_condition(&mut buf, condition)?;
    }

    buf.extend_from_slice(&encode_payload(intent)?);
    Ok(buf)
}

/// Size in bytes of the signed transaction; used for fee estimation before signing.
pub fn unsigned_length(intent: &TransactionIntent) -> Result<usize, EncodeError> {
    let tx = encode_transaction(intent, &[0u8; 20], intent.nonce(), intent.fee(), &[0u8; 65])?;
    Ok(tx.len())
}

/// Hash of the transaction with a cleared spending condition (zero nonce, fee and signature).
pub fn initial_sighash(intent: &TransactionIntent, signer: &[u8]) -> Result<FixedBytes<32>, EncodeError> {
    let cleared = encode_transaction(intent, signer, 0, 0, &[0u8; 65])?;
    Ok(sha512_256(&cleared))
}

/// Digest the signer actually signs: initial sighash bound to auth type, fee and nonce.
pub fn presign_sighash(initial: &FixedBytes<32>, fee: u64, nonce: u64) -> FixedBytes<32> {
    let mut buf = Vec::with_capacity(32 + 1 + 8 + 8);
    buf.extend_from_slice(initial.as_slice());
    buf.push(AUTH_TYPE_STANDARD);
    buf.extend_from_slice(&fee.to_be_bytes());
    buf.extend_from_slice(&nonce.to_be_bytes());
    sha512_256(&buf)
}

/// Sign the intent with a compressed secp256k1 key and serialize the result.
pub fn sign_intent(intent: TransactionIntent, signing_key: &SigningKey) -> Result<SignedTransaction, EncodeError> {
    let public_key = signing_key.verifying_key().to_encoded_point(true);
    let signer = hash160(public_key.as_bytes());

    let initial = initial_sighash(&intent, signer.as_slice())?;
    let presign = presign_sighash(&initial, intent.fee(), intent.nonce());
    let (signature, recovery_id) = signing_key.sign_prehash_recoverable(presign.as_slice())?;

    let mut sig_bytes = [0u8; 65];
    sig_bytes[0] = recovery_id.to_byte();
    sig_bytes[1..].copy_from_slice(&signature.to_bytes());

    let bytes = encode_transaction(&intent, signer.as_slice(), intent.nonce(), intent.fee(), &sig_bytes)?;
    let txid = sha512_256(&bytes);
    Ok(SignedTransaction { intent, signer, signature: sig_bytes, bytes, txid })
}
