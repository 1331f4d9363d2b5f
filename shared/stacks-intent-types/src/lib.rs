//! Value types shared by the intent encoder and the scripts.
//!
//! Nothing in here talks to the network: these are the addresses, Clarity values and
//! post-conditions that a transaction intent is assembled from.

pub mod address;
pub mod clarity;
pub mod hash;
pub mod network;
pub mod post_conditions;

pub use address::{AddressError, ContractId, ParseContractIdError, StacksAddress};
pub use clarity::{ClarityType, ClarityValue};
pub use hash::Hash160;
pub use network::{Network, NetworkParseError};
pub use post_conditions::{AssetInfo, FungibleConditionCode, PostCondition, PostConditionPrincipal};
