//! Backpack-specific wire types
//!
//! The exchange encodes every numeric field as a string; conversion into
//! `Decimal` happens in the REST client, not here.

use serde::{Deserialize, Serialize};

/// Order book depth response: `[price, quantity]` string pairs.
/// Both sides arrive sorted ascending by price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepthResponse {
    #[serde(default)]
    pub bids: Vec<[String; 2]>,
    #[serde(default)]
    pub asks: Vec<[String; 2]>,
    #[serde(default, rename = "lastUpdateId")]
    pub last_update_id: Option<String>,
}

/// Response body of a successful order submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutedOrder {
    /// Exchange-assigned order identifier
    pub id: String,
    /// Echo of the caller-assigned client id
    #[serde(default, rename = "clientId")]
    pub client_id: Option<u64>,
    /// Exchange-side order status, e.g. "New"
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
}
