//! Jing order-book swaps: cancelling and filling asks, and reading the market.

pub mod ask;
pub mod market;
pub mod pairs;

pub use ask::{cancel_ask, get_ask_details, submit_ask, AskDetails};
pub use market::{get_market, JingClient};
pub use pairs::{calculate_ask_fees, get_token_decimals, get_token_info, JingContracts, TokenInfo};
