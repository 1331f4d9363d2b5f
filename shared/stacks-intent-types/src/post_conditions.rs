use std::fmt;

use crate::address::{ContractId, StacksAddress};

/// Comparison applied between the actual amount moved and the post-condition amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FungibleConditionCode {
    Equal = 0x01,
    Greater = 0x02,
    GreaterEqual = 0x03,
    Less = 0x04,
    LessEqual = 0x05,
}

impl FungibleConditionCode {
    /// Whether moving `actual` units satisfies a condition bounded by `amount`.
    pub fn holds(self, actual: u64, amount: u64) -> bool {
        match self {
            FungibleConditionCode::Equal => actual == amount,
            FungibleConditionCode::Greater => actual > amount,
            FungibleConditionCode::GreaterEqual => actual >= amount,
            FungibleConditionCode::Less => actual < amount,
            FungibleConditionCode::LessEqual => actual <= amount,
        }
    }
}

impl TryFrom<u8> for FungibleConditionCode {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use FungibleConditionCode::*;
        let code = match value {
            0x01 => Equal,
            0x02 => Greater,
            0x03 => GreaterEqual,
            0x04 => Less,
            0x05 => LessEqual,
            _ => return Err(()),
        };
        Ok(code)
    }
}

impl fmt::Display for FungibleConditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FungibleConditionCode::Equal => "exactly",
            FungibleConditionCode::Greater => "more than",
            FungibleConditionCode::GreaterEqual => "at least",
            FungibleConditionCode::Less => "less than",
            FungibleConditionCode::LessEqual => "at most",
        };
        f.write_str(s)
    }
}

/// Whose balance a post-condition constrains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostConditionPrincipal {
    /// The transaction's sender, whoever signs it.
    Origin,
    Standard(StacksAddress),
    Contract(ContractId),
}

impl fmt::Display for PostConditionPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostConditionPrincipal::Origin => f.write_str("origin"),
            PostConditionPrincipal::Standard(address) => write!(f, "{address}"),
            PostConditionPrincipal::Contract(contract) => write!(f, "{contract}"),
        }
    }
}

/// A SIP-010 token: defining contract plus the `define-fungible-token` name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetInfo {
    pub contract: ContractId,
    pub asset_name: String,
}

impl AssetInfo {
    pub fn new(contract: ContractId, asset_name: impl Into<String>) -> Self {
        Self {
            contract,
            asset_name: asset_name.into(),
        }
    }
}

impl fmt::Display for AssetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.contract, self.asset_name)
    }
}

/// Bound on how much of an asset a principal may send when the transaction executes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostCondition {
    Stx {
        principal: PostConditionPrincipal,
        code: FungibleConditionCode,
        amount: u64,
    },
    FungibleToken {
        principal: PostConditionPrincipal,
        asset: AssetInfo,
        code: FungibleConditionCode,
        amount: u64,
    },
}

impl PostCondition {
    pub fn standard_stx(address: StacksAddress, code: FungibleConditionCode, amount: u64) -> Self {
        PostCondition::Stx {
            principal: PostConditionPrincipal::Standard(address),
            code,
            amount,
        }
    }

    pub fn contract_fungible(
        contract: ContractId,
        code: FungibleConditionCode,
        amount: u64,
        asset: AssetInfo,
    ) -> Self {
        PostCondition::FungibleToken {
            principal: PostConditionPrincipal::Contract(contract),
            asset,
            code,
            amount,
        }
    }

    pub fn principal(&self) -> &PostConditionPrincipal {
        match self {
            PostCondition::Stx { principal, .. } | PostCondition::FungibleToken { principal, .. } => {
                principal
            }
        }
    }

    pub fn code(&self) -> FungibleConditionCode {
        match self {
            PostCondition::Stx { code, .. } | PostCondition::FungibleToken { code, .. } => *code,
        }
    }

    pub fn amount(&self) -> u64 {
        match self {
            PostCondition::Stx { amount, .. } | PostCondition::FungibleToken { amount, .. } => {
                *amount
            }
        }
    }

    /// Check an observed transfer of `actual` units against this condition.
    pub fn is_satisfied_by(&self, actual: u64) -> bool {
        self.code().holds(actual, self.amount())
    }
}

impl fmt::Display for PostCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostCondition::Stx {
                principal,
                code,
                amount,
            } => write!(f, "{principal} sends {code} {amount} uSTX"),
            PostCondition::FungibleToken {
                principal,
                asset,
                code,
                amount,
            } => write!(f, "{principal} sends {code} {amount} {asset}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_codes_compare_actual_against_bound() {
        assert!(FungibleConditionCode::Equal.holds(10, 10));
        assert!(!FungibleConditionCode::Equal.holds(9, 10));
        assert!(FungibleConditionCode::LessEqual.holds(0, 10));
        assert!(!FungibleConditionCode::LessEqual.holds(11, 10));
        assert!(FungibleConditionCode::Greater.holds(11, 10));
        assert!(FungibleConditionCode::GreaterEqual.holds(10, 10));
        assert!(FungibleConditionCode::Less.holds(9, 10));
    }

    #[test]
    fn fungible_condition_describes_itself() {
        let contract: ContractId = "SP1Z92MPDQEWZXW36VX71Q25HKF5K2EPCJ304F275.tokensoft-token-v4k68639zxz"
            .parse()
            .unwrap();
        let pc = PostCondition::contract_fungible(
            contract.clone(),
            FungibleConditionCode::Equal,
            42,
            AssetInfo::new(contract, "tokensoft-token"),
        );
        assert!(pc.is_satisfied_by(42));
        assert!(!pc.is_satisfied_by(41));
        assert_eq!(
            pc.to_string(),
            "SP1Z92MPDQEWZXW36VX71Q25HKF5K2EPCJ304F275.tokensoft-token-v4k68639zxz sends exactly 42 \
             SP1Z92MPDQEWZXW36VX71Q25HKF5K2EPCJ304F275.tokensoft-token-v4k68639zxz::tokensoft-token"
        );
    }
}
