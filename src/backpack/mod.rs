//! Backpack module - client implementation for the Backpack exchange REST API

pub mod instructions;
pub mod messages;
pub mod rest;
pub mod signer;

pub use rest::BackpackRestClient;
pub use signer::RequestSigner;
