use std::collections::BTreeMap;

use alloy_primitives::FixedBytes;
use stacks_intent_types::{ClarityType, ClarityValue, ContractId, StacksAddress};

const MAX_DEPTH_DEFAULT: usize = 64;

/// Errors during Clarity value decoding.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown clarity type prefix 0x{0:02x}")]
    UnknownType(u8),
    #[error("value is truncated")]
    Truncated,
    #[error("value nests deeper than {0} levels")]
    TooDeep(usize),
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("string is not valid {0}")]
    InvalidString(&'static str),
    #[error("invalid contract name")]
    InvalidContractName,
}

/// Decode a hex string as returned by the node (`0x`-prefixed or bare).
pub fn decode_clarity_hex(hex_str: &str) -> Result<ClarityValue, DecodeError> {
    let trimmed = hex_str.trim();
    let body = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(body).map_err(|e| DecodeError::InvalidHex(e.to_string()))?;
    decode_clarity_value(&bytes)
}

/// Decode exactly one value; trailing bytes are an error.
pub fn decode_clarity_value(bytes: &[u8]) -> Result<ClarityValue, DecodeError> {
    decode_clarity_value_with_limit(bytes, MAX_DEPTH_DEFAULT)
}

pub fn decode_clarity_value_with_limit(bytes: &[u8], max_depth: usize) -> Result<ClarityValue, DecodeError> {
    let mut i = 0usize;
    let value = read_value(bytes, &mut i, 0, max_depth)?;
    if i != bytes.len() {
        return Err(DecodeError::TrailingBytes(bytes.len() - i));
    }
    Ok(value)
}

fn read_value(bytes: &[u8], i: &mut usize, depth: usize, max_depth: usize) -> Result<ClarityValue, DecodeError> {
    if depth > max_depth {
        return Err(DecodeError::TooDeep(max_depth));
    }
    let prefix = read_u8(bytes, i)?;
    let ty = ClarityType::try_from(prefix).map_err(|_| DecodeError::UnknownType(prefix))?;

    let value = match ty {
        ClarityType::Int => ClarityValue::Int(read_u128(bytes, i)? as i128),
        ClarityType::UInt => ClarityValue::UInt(read_u128(bytes, i)?),
        ClarityType::Buffer => {
            let len = read_u32(bytes, i)? as usize;
            ClarityValue::Buffer(read_vec(bytes, i, len)?)
        }
        ClarityType::BoolTrue => ClarityValue::Bool(true),
        ClarityType::BoolFalse => ClarityValue::Bool(false),
        ClarityType::PrincipalStandard => ClarityValue::StandardPrincipal(read_address(bytes, i)?),
        ClarityType::PrincipalContract => {
            let address = read_address(bytes, i)?;
            let name = read_name(bytes, i)?;
            let contract = ContractId::new(address, name).map_err(|_| DecodeError::InvalidContractName)?;
            ClarityValue::ContractPrincipal(contract)
        }
        ClarityType::ResponseOk => ClarityValue::ok(read_value(bytes, i, depth + 1, max_depth)?),
        ClarityType::ResponseErr => ClarityValue::err(read_value(bytes, i, depth + 1, max_depth)?),
        ClarityType::OptionalNone => ClarityValue::OptionalNone,
        ClarityType::OptionalSome => ClarityValue::some(read_value(bytes, i, depth + 1, max_depth)?),
        ClarityType::List => {
            let count = read_u32(bytes, i)? as usize;
            // every element takes at least one byte
            if bytes.len().saturating_sub(*i) < count {
                return Err(DecodeError::Truncated);
            }
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(read_value(bytes, i, depth + 1, max_depth)?);
            }
            ClarityValue::List(items)
        }
        ClarityType::Tuple => {
            let count = read_u32(bytes, i)? as usize;
            let mut members = BTreeMap::new();
            for _ in 0..count {
                let key = read_name(bytes, i)?;
                let member = read_value(bytes, i, depth + 1, max_depth)?;
                members.insert(key, member);
            }
            ClarityValue::Tuple(members)
        }
        ClarityType::StringAscii => {
            let len = read_u32(bytes, i)? as usize;
            let raw = read_vec(bytes, i, len)?;
            if !raw.is_ascii() {
                return Err(DecodeError::InvalidString("ascii"));
            }
            ClarityValue::StringAscii(String::from_utf8(raw).map_err(|_| DecodeError::InvalidString("ascii"))?)
        }
        ClarityType::StringUtf8 => {
            let len = read_u32(bytes, i)? as usize;
            let raw = read_vec(bytes, i, len)?;
            ClarityValue::StringUtf8(String::from_utf8(raw).map_err(|_| DecodeError::InvalidString("utf-8"))?)
        }
    };
    Ok(value)
}

fn read_u8(bytes: &[u8], i: &mut usize) -> Result<u8, DecodeError> {
    let b = *bytes.get(*i).ok_or(DecodeError::Truncated)?;
    *i += 1;
    Ok(b)
}

fn read_vec(bytes: &[u8], i: &mut usize, len: usize) -> Result<Vec<u8>, DecodeError> {
    if bytes.len().saturating_sub(*i) < len {
        return Err(DecodeError::Truncated);
    }
    let out = bytes[*i..*i + len].to_vec();
    *i += len;
    Ok(out)
}

fn read_u32(bytes: &[u8], i: &mut usize) -> Result<u32, DecodeError> {
    if bytes.len() < *i + 4 {
        return Err(DecodeError::Truncated);
    }
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[*i..*i + 4]);
    *i += 4;
    Ok(u32::from_be_bytes(buf))
}

fn read_u128(bytes: &[u8], i: &mut usize) -> Result<u128, DecodeError> {
    if bytes.len() < *i + 16 {
        return Err(DecodeError::Truncated);
    }
    let mut buf = [0u8; 16];
    buf.copy_from_slice(&bytes[*i..*i + 16]);
    *i += 16;
    Ok(u128::from_be_bytes(buf))
}

fn read_address(bytes: &[u8], i: &mut usize) -> Result<StacksAddress, DecodeError> {
    let version = read_u8(bytes, i)?;
    if bytes.len() < *i + 20 {
        return Err(DecodeError::Truncated);
    }
    let hash = FixedBytes::<20>::from_slice(&bytes[*i..*i + 20]);
    *i += 20;
    Ok(StacksAddress::new(version, hash))
}

fn read_name(bytes: &[u8], i: &mut usize) -> Result<String, DecodeError> {
    let len = read_u8(bytes, i)? as usize;
    let raw = read_vec(bytes, i, len)?;
    String::from_utf8(raw).map_err(|_| DecodeError::InvalidString("ascii"))
}
