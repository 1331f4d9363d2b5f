//! Wire codecs and signing for Stacks contract-call intents.
//!
//! - Clarity value serialization / deserialization
//! - post-condition encoding
//! - single-sig transaction serialization, sighash and recoverable signing
//! - `cvToJSON`-style rendering of decoded values

pub mod decoder;
pub mod encoder;
pub mod json;
pub mod types;


pub use decoder::{decode_clarity_hex, decode_clarity_value, DecodeError};
pub use encoder::{encode_clarity_value, sign_intent, EncodeError};
pub use json::cv_to_json;
pub use types::{AnchorMode, ContractCallBuilder, PostConditionMode, SignedTransaction, TransactionIntent};
