//! Shared collaborators for the Stacks scripts: configuration, account derivation,
//! node access, broadcasting and the JSON response envelope.
//!
//! Each binary under `src/bin` is one script; the flows themselves live in the
//! modules below so they can be exercised against [`mock::MockStacksNode`].

pub mod account;
pub mod args;
pub mod broadcast;
pub mod config;
pub mod dao;
pub mod error;
pub mod faucet;
pub mod hiro;
pub mod jing;
pub mod mock;
pub mod node;
pub mod response;
pub mod runes;
pub mod units;
pub mod wallet;

pub use account::{derive_child_account, derive_child_accounts, Account};
pub use args::parse_args;
pub use config::{require_env, Config};
pub use error::{ApiError, ScriptError};
pub use node::{BroadcastResult, StacksNode};
pub use response::{run_script, ToolResponse};

/// Load `.env` and install the logger. Call once at the top of every binary.
pub fn init() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}
