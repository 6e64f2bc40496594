//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::{ClientError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with BACKPACK__)
/// 2. Configuration file (TOML format)
/// 3. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    // Add default config file if it exists
    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    // Add environment variables with BACKPACK__ prefix,
    // e.g. BACKPACK__EXCHANGE__API_KEY
    builder = builder.add_source(
        Environment::with_prefix("BACKPACK")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ClientError::Configuration(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ClientError::Configuration(e.to_string()))
}

/// Load configuration from environment variables only
pub fn load_from_env() -> Result<AppConfig> {
    // Try to load from .env file
    dotenvy::dotenv().ok();

    let exchange = super::types::ExchangeConfig {
        base_url: std::env::var("BACKPACK_BASE_URL")
            .unwrap_or_else(|_| "https://api.backpack.exchange/api/v1".to_string()),
        api_key: std::env::var("BACKPACK_API_KEY").ok(),
        api_secret: std::env::var("BACKPACK_API_SECRET").ok(),
        ..Default::default()
    };

    let trading_pair = std::env::var("BACKPACK_TRADING_PAIR")
        .map_err(|_| ClientError::Configuration("BACKPACK_TRADING_PAIR is not set".to_string()))?;
    let single_order_quantity = std::env::var("BACKPACK_ORDER_QUANTITY")
        .map_err(|_| ClientError::Configuration("BACKPACK_ORDER_QUANTITY is not set".to_string()))?
        .parse()
        .map_err(|e| {
            ClientError::Configuration(format!("invalid BACKPACK_ORDER_QUANTITY: {}", e))
        })?;

    let trading = super::types::TradingConfig {
        trading_pair,
        single_order_quantity,
        iterations: std::env::var("BACKPACK_ITERATIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10),
        poll_interval_ms: 1000,
        fill_timeout_secs: 120,
    };

    Ok(AppConfig {
        exchange,
        trading,
        order_defaults: super::types::OrderDefaults::default(),
    })
}
