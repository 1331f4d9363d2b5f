//! Stacks addresses (c32check) and `address.name` contract identifiers.

use std::{fmt, str::FromStr};

use alloy_primitives::FixedBytes;
use thiserror::Error;

use crate::{
    hash::{hash160, sha256, Hash160},
    network::{Network, ADDRESS_VERSION_MAINNET_MULTISIG, ADDRESS_VERSION_MAINNET_SINGLESIG},
};

const C32_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Contract names are limited to 128 characters on chain.
pub const MAX_CONTRACT_NAME_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address must start with 'S'")]
    MissingPrefix,
    #[error("invalid c32 character `{0}`")]
    InvalidCharacter(char),
    #[error("address version {0} is out of range")]
    InvalidVersion(u8),
    #[error("address payload must be 24 bytes, got {0}")]
    InvalidLength(usize),
    #[error("address checksum mismatch")]
    BadChecksum,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseContractIdError {
    #[error("`{0}` is not of the form <address>.<contract-name>")]
    MissingSeparator(String),
    #[error("invalid contract address: {0}")]
    Address(#[from] AddressError),
    #[error("invalid contract name `{0}`")]
    InvalidName(String),
}

/// A standard principal: address version byte plus the hash160 of the owning key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StacksAddress {
    pub version: u8,
    pub hash160: Hash160,
}

impl StacksAddress {
    pub fn new(version: u8, hash160: Hash160) -> Self {
        Self { version, hash160 }
    }

    /// Single-sig (P2PKH) address for a compressed secp256k1 public key.
    pub fn from_public_key(network: Network, compressed_public_key: &[u8]) -> Self {
        Self::new(network.single_sig_version(), hash160(compressed_public_key))
    }

    pub fn is_mainnet(&self) -> bool {
        matches!(
            self.version,
            ADDRESS_VERSION_MAINNET_SINGLESIG | ADDRESS_VERSION_MAINNET_MULTISIG
        )
    }
}

impl fmt::Display for StacksAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&c32check_encode(self.version, self.hash160.as_slice()))
    }
}

impl FromStr for StacksAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (version, payload) = c32check_decode(s)?;
        if payload.len() != 20 {
            return Err(AddressError::InvalidLength(payload.len() + 4));
        }
        let mut buf = [0u8; 20];
        buf.copy_from_slice(&payload);
        Ok(Self::new(version, FixedBytes(buf)))
    }
}

/// Fully-qualified contract identifier, `SP….contract-name`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContractId {
    pub address: StacksAddress,
    pub name: String,
}

impl ContractId {
    pub fn new(address: StacksAddress, name: impl Into<String>) -> Result<Self, ParseContractIdError> {
        let name = name.into();
        if !is_valid_contract_name(&name) {
            return Err(ParseContractIdError::InvalidName(name));
        }
        Ok(Self { address, name })
    }

    /// Parse from separate address and name parts.
    pub fn from_parts(address: &str, name: &str) -> Result<Self, ParseContractIdError> {
        Self::new(address.parse()?, name)
    }
}

impl FromStr for ContractId {
    type Err = ParseContractIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address, name) = s
            .split_once('.')
            .filter(|(a, n)| !a.is_empty() && !n.is_empty())
            .ok_or_else(|| ParseContractIdError::MissingSeparator(s.to_string()))?;
        Self::from_parts(address, name)
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.address, self.name)
    }
}

/// `[a-zA-Z]([a-zA-Z0-9]|[-_])*`, at most 128 characters.
pub fn is_valid_contract_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    name.len() <= MAX_CONTRACT_NAME_LEN
        && first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Crockford-style base32 used by Stacks. Leading zero bytes map to leading `0` digits.
pub fn c32_encode(bytes: &[u8]) -> String {
    let leading_zeros = bytes.iter().take_while(|b| **b == 0).count();
    let mut num: Vec<u8> = bytes[leading_zeros..].to_vec();
    let mut digits: Vec<u8> = Vec::with_capacity(bytes.len() * 8 / 5 + 1);

    while num.iter().any(|b| *b != 0) {
        let mut rem = 0u32;
        for b in num.iter_mut() {
            let acc = (rem << 8) | u32::from(*b);
            *b = (acc / 32) as u8;
            rem = acc % 32;
        }
        digits.push(C32_ALPHABET[rem as usize]);
    }
    digits.extend(std::iter::repeat(b'0').take(leading_zeros));
    digits.reverse();
    // alphabet is ASCII
    digits.into_iter().map(char::from).collect()
}

pub fn c32_decode(input: &str) -> Result<Vec<u8>, AddressError> {
    let mut values = Vec::with_capacity(input.len());
    for c in input.chars() {
        values.push(c32_value(c)?);
    }
    let leading_zeros = values.iter().take_while(|v| **v == 0).count();

    // big-endian base-256 accumulator
    let mut num: Vec<u8> = Vec::new();
    for value in &values[leading_zeros..] {
        let mut carry = u32::from(*value);
        for b in num.iter_mut().rev() {
            let acc = u32::from(*b) * 32 + carry;
            *b = (acc & 0xff) as u8;
            carry = acc >> 8;
        }
        while carry > 0 {
            num.insert(0, (carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; leading_zeros];
    out.extend(num);
    Ok(out)
}

fn c32_value(c: char) -> Result<u8, AddressError> {
    let normalized = match c.to_ascii_uppercase() {
        'O' => '0',
        'L' | 'I' => '1',
        other => other,
    };
    C32_ALPHABET
        .iter()
        .position(|a| char::from(*a) == normalized)
        .map(|p| p as u8)
        .ok_or(AddressError::InvalidCharacter(c))
}

fn checksum(version: u8, data: &[u8]) -> [u8; 4] {
    let mut buf = Vec::with_capacity(1 + data.len());
    buf.push(version);
    buf.extend_from_slice(data);
    let digest = sha256(&sha256(&buf));
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

/// `S` + version character + c32(data || checksum).
pub fn c32check_encode(version: u8, data: &[u8]) -> String {
    let mut payload = data.to_vec();
    payload.extend_from_slice(&checksum(version, data));
    let version_char = char::from(C32_ALPHABET[usize::from(version % 32)]);
    format!("S{version_char}{}", c32_encode(&payload))
}

pub fn c32check_decode(address: &str) -> Result<(u8, Vec<u8>), AddressError> {
    let rest = address.strip_prefix('S').ok_or(AddressError::MissingPrefix)?;
    let mut chars = rest.chars();
    let version_char = chars.next().ok_or(AddressError::InvalidLength(0))?;
    let version = c32_value(version_char)?;
    if version >= 32 {
        return Err(AddressError::InvalidVersion(version));
    }

    let decoded = c32_decode(chars.as_str())?;
    if decoded.len() != 24 {
        return Err(AddressError::InvalidLength(decoded.len()));
    }
    let (data, check) = decoded.split_at(decoded.len() - 4);
    if checksum(version, data) != check {
        return Err(AddressError::BadChecksum);
    }
    Ok((version, data.to_vec()))
}
