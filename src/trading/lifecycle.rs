//! Fill polling
//!
//! A submitted order is watched by querying the exchange once per interval
//! until it leaves the book. The wait is bounded by a deadline and honors a
//! cancellation token at every suspension point, so a never-filling order
//! surfaces as [`FillOutcome::TimedOut`] instead of blocking forever.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::backpack::rest::BackpackRestClient;
use crate::common::errors::Result;
use crate::common::types::OrderState;

/// How a fill wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// The order left the book within the deadline
    Confirmed,
    /// The deadline passed with the order still resting
    TimedOut,
    /// Shutdown was requested while waiting
    Cancelled,
}

/// Polling cadence and bound for a fill wait
#[derive(Debug, Clone, Copy)]
pub struct PollOptions {
    /// Delay between consecutive order queries
    pub interval: Duration,
    /// Total time to wait before giving up
    pub timeout: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Poll the exchange until the order fills, the deadline passes, or
/// shutdown is requested
///
/// The first query is issued immediately; subsequent queries are spaced by
/// `opts.interval`. Transport errors during polling propagate to the caller.
pub async fn wait_for_fill(
    client: &BackpackRestClient,
    client_id: u64,
    symbol: &str,
    opts: &PollOptions,
    cancel: &CancellationToken,
) -> Result<FillOutcome> {
    let deadline = Instant::now() + opts.timeout;

    loop {
        match client.query_order(client_id, symbol).await? {
            OrderState::Filled => {
                info!(client_id, symbol, "Order executed successfully");
                return Ok(FillOutcome::Confirmed);
            }
            OrderState::Pending => {
                info!(client_id, symbol, "Order is still pending execution");
            }
        }

        if Instant::now() >= deadline {
            warn!(client_id, symbol, "Order did not fill before the deadline");
            return Ok(FillOutcome::TimedOut);
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                info!(client_id, symbol, "Fill wait cancelled");
                return Ok(FillOutcome::Cancelled);
            }
            _ = tokio::time::sleep(opts.interval) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_poll_options() {
        let opts = PollOptions::default();
        assert_eq!(opts.interval, Duration::from_secs(1));
        assert_eq!(opts.timeout, Duration::from_secs(120));
    }
}
