//! Common test utilities and fixtures

#![allow(dead_code)]

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use backpack_maker::config::types::ApiCredentials;
use backpack_maker::{BackpackRestClient, RequestSigner};

/// Deterministic throwaway ED25519 seed for test signing
pub const TEST_SEED: [u8; 32] = [42u8; 32];

/// Credentials built from the test seed
pub fn test_credentials() -> ApiCredentials {
    ApiCredentials::new("test_api_key".to_string(), BASE64.encode(TEST_SEED))
}

/// A client with the test signer attached, pointed at `base_url`
pub fn signed_client(base_url: &str) -> BackpackRestClient {
    let signer = RequestSigner::new(&test_credentials()).expect("Failed to create test signer");
    BackpackRestClient::with_timeout(base_url, Duration::from_secs(5))
        .expect("Failed to create REST client")
        .with_signer(signer)
}

/// Sample API responses for mock endpoints
pub mod api_responses {
    /// Sample depth response; both sides ascending as the wire sends them
    pub const DEPTH: &str = r#"{
        "asks": [["100", "1"], ["100.5", "3"], ["101", "2"]],
        "bids": [["98", "2"], ["98.5", "1"], ["99", "1"]],
        "lastUpdateId": "12345"
    }"#;

    /// Sample successful order submission response
    pub const EXECUTED_ORDER: &str =
        r#"{"id": "1113024", "clientId": 0, "status": "New", "symbol": "SOL_USDC"}"#;

    /// Sample balance response keyed by asset
    pub const BALANCES: &str = r#"{
        "SOL": {"available": "12.5", "locked": "0.5", "staked": "0"},
        "USDC": {"available": "1000", "locked": "0", "staked": "0"}
    }"#;
}
