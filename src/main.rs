//! backpack-maker - Main Entry Point
//!
//! Places alternating bid/ask orders around the Backpack top-of-book and
//! polls each one until it fills, for a configured number of iterations.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use backpack_maker::backpack::{BackpackRestClient, RequestSigner};
use backpack_maker::config::load_config;
use backpack_maker::trading::MarketMaker;

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Override the configured number of iterations
    #[arg(long)]
    iterations: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting backpack-maker");
    info!("Configuration file: {}", args.config);

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let mut config = load_config(Some(&args.config))?;
    if let Some(iterations) = args.iterations {
        config.trading.iterations = iterations;
    }

    // Credentials are required to trade; bail out before touching the network
    let credentials = config.exchange.credentials().map_err(|e| {
        error!("Cannot start without credentials: {}", e);
        e
    })?;
    let signer = RequestSigner::new(&credentials)?;

    let client = BackpackRestClient::with_timeout(
        &config.exchange.base_url,
        Duration::from_secs(config.exchange.request_timeout_secs),
    )?
    .with_signer(signer)
    .with_window(config.exchange.window_ms);

    let maker = MarketMaker::new(client, config.trading, config.order_defaults);

    // Ctrl-C requests a cooperative stop at the next suspension point
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal, cleaning up...");
            ctrl_c_cancel.cancel();
        }
    });

    maker.run(&cancel).await?;

    info!("Trading loop finished");
    Ok(())
}
