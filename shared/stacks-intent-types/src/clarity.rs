use std::{collections::BTreeMap, fmt};

use crate::address::{ContractId, ParseContractIdError, StacksAddress};

/// Type prefixes of the Clarity value wire format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ClarityType {
    Int = 0x00,
    UInt = 0x01,
    Buffer = 0x02,
    BoolTrue = 0x03,
    BoolFalse = 0x04,
    PrincipalStandard = 0x05,
    PrincipalContract = 0x06,
    ResponseOk = 0x07,
    ResponseErr = 0x08,
    OptionalNone = 0x09,
    OptionalSome = 0x0a,
    List = 0x0b,
    Tuple = 0x0c,
    StringAscii = 0x0d,
    StringUtf8 = 0x0e,
}

impl TryFrom<u8> for ClarityType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use ClarityType::*;
        let ty = match value {
            0x00 => Int,
            0x01 => UInt,
            0x02 => Buffer,
            0x03 => BoolTrue,
            0x04 => BoolFalse,
            0x05 => PrincipalStandard,
            0x06 => PrincipalContract,
            0x07 => ResponseOk,
            0x08 => ResponseErr,
            0x09 => OptionalNone,
            0x0a => OptionalSome,
            0x0b => List,
            0x0c => Tuple,
            0x0d => StringAscii,
            0x0e => StringUtf8,
            _ => return Err(()),
        };
        Ok(ty)
    }
}

/// A Clarity value, as passed to contract functions or returned by read-only calls.
///
/// Tuple members are kept in a `BTreeMap` so they are always in the canonical (sorted)
/// order the wire format requires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClarityValue {
    Int(i128),
    UInt(u128),
    Buffer(Vec<u8>),
    Bool(bool),
    StandardPrincipal(StacksAddress),
    ContractPrincipal(ContractId),
    ResponseOk(Box<ClarityValue>),
    ResponseErr(Box<ClarityValue>),
    OptionalNone,
    OptionalSome(Box<ClarityValue>),
    List(Vec<ClarityValue>),
    Tuple(BTreeMap<String, ClarityValue>),
    StringAscii(String),
    StringUtf8(String),
}

impl ClarityValue {
    pub fn uint(value: impl Into<u128>) -> Self {
        ClarityValue::UInt(value.into())
    }

    pub fn int(value: impl Into<i128>) -> Self {
        ClarityValue::Int(value.into())
    }

    pub fn buffer(bytes: impl Into<Vec<u8>>) -> Self {
        ClarityValue::Buffer(bytes.into())
    }

    pub fn string_ascii(s: impl Into<String>) -> Self {
        ClarityValue::StringAscii(s.into())
    }

    pub fn string_utf8(s: impl Into<String>) -> Self {
        ClarityValue::StringUtf8(s.into())
    }

    pub fn some(value: ClarityValue) -> Self {
        ClarityValue::OptionalSome(Box::new(value))
    }

    pub fn none() -> Self {
        ClarityValue::OptionalNone
    }

    pub fn ok(value: ClarityValue) -> Self {
        ClarityValue::ResponseOk(Box::new(value))
    }

    pub fn err(value: ClarityValue) -> Self {
        ClarityValue::ResponseErr(Box::new(value))
    }

    pub fn tuple<K, I>(members: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ClarityValue)>,
    {
        ClarityValue::Tuple(members.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn contract_principal(contract: ContractId) -> Self {
        ClarityValue::ContractPrincipal(contract)
    }

    pub fn standard_principal(address: StacksAddress) -> Self {
        ClarityValue::StandardPrincipal(address)
    }

    /// Parse either `SP…` or `SP….contract-name` into the matching principal value.
    pub fn principal(s: &str) -> Result<Self, ParseContractIdError> {
        if s.contains('.') {
            Ok(ClarityValue::ContractPrincipal(s.parse()?))
        } else {
            Ok(ClarityValue::StandardPrincipal(s.parse()?))
        }
    }

    pub fn type_tag(&self) -> ClarityType {
        match self {
            ClarityValue::Int(_) => ClarityType::Int,
            ClarityValue::UInt(_) => ClarityType::UInt,
            ClarityValue::Buffer(_) => ClarityType::Buffer,
            ClarityValue::Bool(true) => ClarityType::BoolTrue,
            ClarityValue::Bool(false) => ClarityType::BoolFalse,
            ClarityValue::StandardPrincipal(_) => ClarityType::PrincipalStandard,
            ClarityValue::ContractPrincipal(_) => ClarityType::PrincipalContract,
            ClarityValue::ResponseOk(_) => ClarityType::ResponseOk,
            ClarityValue::ResponseErr(_) => ClarityType::ResponseErr,
            ClarityValue::OptionalNone => ClarityType::OptionalNone,
            ClarityValue::OptionalSome(_) => ClarityType::OptionalSome,
            ClarityValue::List(_) => ClarityType::List,
            ClarityValue::Tuple(_) => ClarityType::Tuple,
            ClarityValue::StringAscii(_) => ClarityType::StringAscii,
            ClarityValue::StringUtf8(_) => ClarityType::StringUtf8,
        }
    }

    pub fn as_uint(&self) -> Option<u128> {
        match self {
            ClarityValue::UInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&BTreeMap<String, ClarityValue>> {
        match self {
            ClarityValue::Tuple(members) => Some(members),
            _ => None,
        }
    }

    /// Tuple member lookup; `None` for non-tuples and missing keys.
    pub fn get(&self, key: &str) -> Option<&ClarityValue> {
        self.as_tuple().and_then(|members| members.get(key))
    }

    /// Principal rendered as a string (`SP…` or `SP….name`).
    pub fn as_principal(&self) -> Option<String> {
        match self {
            ClarityValue::StandardPrincipal(address) => Some(address.to_string()),
            ClarityValue::ContractPrincipal(contract) => Some(contract.to_string()),
            _ => None,
        }
    }

    /// Unwraps `(ok v)` and `(some v)`; anything else (including `err`/`none`) is `None`.
    pub fn success_value(&self) -> Option<&ClarityValue> {
        match self {
            ClarityValue::ResponseOk(inner) | ClarityValue::OptionalSome(inner) => {
                Some(inner.as_ref())
            }
            _ => None,
        }
    }
}

impl fmt::Display for ClarityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClarityValue::Int(v) => write!(f, "{v}"),
            ClarityValue::UInt(v) => write!(f, "u{v}"),
            ClarityValue::Buffer(bytes) => {
                f.write_str("0x")?;
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            ClarityValue::Bool(v) => write!(f, "{v}"),
            ClarityValue::StandardPrincipal(address) => write!(f, "'{address}"),
            ClarityValue::ContractPrincipal(contract) => write!(f, "'{contract}"),
            ClarityValue::ResponseOk(inner) => write!(f, "(ok {inner})"),
            ClarityValue::ResponseErr(inner) => write!(f, "(err {inner})"),
            ClarityValue::OptionalNone => f.write_str("none"),
            ClarityValue::OptionalSome(inner) => write!(f, "(some {inner})"),
            ClarityValue::List(items) => {
                f.write_str("(list")?;
                for item in items {
                    write!(f, " {item}")?;
                }
                f.write_str(")")
            }
            ClarityValue::Tuple(members) => {
                f.write_str("(tuple")?;
                for (key, value) in members {
                    write!(f, " ({key} {value})")?;
                }
                f.write_str(")")
            }
            ClarityValue::StringAscii(s) => write!(f, "{s:?}"),
            ClarityValue::StringUtf8(s) => write!(f, "u{s:?}"),
        }
    }
}
