//! Configuration types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::errors::{ClientError, Result};
use crate::common::types::{OrderType, TimeInForce};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Exchange connection and credentials
    #[serde(default)]
    pub exchange: ExchangeConfig,
    /// Trading loop parameters
    pub trading: TradingConfig,
    /// Default order fields applied to every order
    #[serde(default)]
    pub order_defaults: OrderDefaults,
}

/// Exchange connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Base URL for the REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key for authenticated requests
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base64-encoded ED25519 private key seed for signing requests
    #[serde(default)]
    pub api_secret: Option<String>,
    /// Signature validity window in milliseconds
    #[serde(default = "default_window_ms")]
    pub window_ms: u32,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_secret: None,
            window_ms: default_window_ms(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ExchangeConfig {
    /// Extract credentials, failing if either half is missing
    pub fn credentials(&self) -> Result<ApiCredentials> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Ok(ApiCredentials::new(key.clone(), secret.clone())),
            _ => Err(ClientError::Configuration(
                "api_key and api_secret are required for trading".to_string(),
            )),
        }
    }
}

fn default_base_url() -> String {
    "https://api.backpack.exchange/api/v1".to_string()
}

fn default_window_ms() -> u32 {
    5000
}

fn default_request_timeout() -> u64 {
    30
}

/// Trading loop parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingConfig {
    /// Trading pair to quote, e.g. "SOL_USDC"
    pub trading_pair: String,
    /// Quantity placed on each bid; the ask leg takes a fee haircut
    pub single_order_quantity: Decimal,
    /// Number of bid/ask round trips to run
    #[serde(default = "default_iterations")]
    pub iterations: u64,
    /// Delay between fill-status polls in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// Give up waiting for a fill after this many seconds
    #[serde(default = "default_fill_timeout")]
    pub fill_timeout_secs: u64,
}

fn default_iterations() -> u64 {
    10
}

fn default_poll_interval() -> u64 {
    1000
}

fn default_fill_timeout() -> u64 {
    120
}

/// Default order fields shared by every order in the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDefaults {
    #[serde(default = "default_order_type")]
    pub order_type: OrderType,
    #[serde(default = "default_time_in_force")]
    pub time_in_force: TimeInForce,
}

impl Default for OrderDefaults {
    fn default() -> Self {
        Self {
            order_type: default_order_type(),
            time_in_force: default_time_in_force(),
        }
    }
}

fn default_order_type() -> OrderType {
    OrderType::Limit
}

fn default_time_in_force() -> TimeInForce {
    TimeInForce::Gtc
}

/// API credentials for authenticated requests
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl ApiCredentials {
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exchange_defaults() {
        let exchange = ExchangeConfig::default();
        assert_eq!(exchange.base_url, "https://api.backpack.exchange/api/v1");
        assert_eq!(exchange.window_ms, 5000);
        assert!(exchange.credentials().is_err());
    }

    #[test]
    fn test_trading_config_from_toml() {
        let toml = r#"
            [trading]
            trading_pair = "SOL_USDC"
            single_order_quantity = "10"
        "#;
        let config: AppConfig = ::config::Config::builder()
            .add_source(::config::File::from_str(toml, ::config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.trading.trading_pair, "SOL_USDC");
        assert_eq!(config.trading.single_order_quantity, dec!(10));
        assert_eq!(config.trading.iterations, 10);
        assert_eq!(config.trading.poll_interval_ms, 1000);
        assert_eq!(config.order_defaults.order_type, OrderType::Limit);
        assert_eq!(config.order_defaults.time_in_force, TimeInForce::Gtc);
    }
}
