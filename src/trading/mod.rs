//! Trading module - order construction, fill polling, and the quoting loop

pub mod lifecycle;
pub mod order;
pub mod runner;

pub use lifecycle::{wait_for_fill, FillOutcome, PollOptions};
pub use order::{OrderBuilder, OrderRequest};
pub use runner::MarketMaker;
