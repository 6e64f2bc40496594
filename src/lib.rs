//! backpack-maker Library
//!
//! A Rust market-making loop for the Backpack exchange: signs REST requests
//! with the account's ED25519 key, crosses the spread with alternating
//! bid/ask orders, and polls each order until it fills.

pub mod backpack;
pub mod common;
pub mod config;
pub mod trading;

// Re-export commonly used types
pub use backpack::instructions::Instruction;
pub use backpack::rest::{order_state_from_status, BackpackRestClient};
pub use backpack::signer::{signing_payload, RequestSigner};
pub use common::errors::{ClientError, Result};
pub use common::types::{
    Balance, MarketSnapshot, OrderState, OrderType, PriceLevel, Side, TimeInForce,
};
pub use config::types::{ApiCredentials, AppConfig};
pub use trading::lifecycle::{wait_for_fill, FillOutcome, PollOptions};
pub use trading::order::{OrderBuilder, OrderRequest};
pub use trading::runner::MarketMaker;
