//! The market-making loop
//!
//! Each iteration places a bid that crosses the spread at the best ask,
//! waits for it to fill, then places an ask at the refreshed best bid and
//! waits again. Prices come from a fresh depth snapshot before every order.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::lifecycle::{wait_for_fill, FillOutcome, PollOptions};
use super::order::OrderRequest;
use crate::backpack::rest::BackpackRestClient;
use crate::common::errors::{ClientError, Result};
use crate::common::types::Side;
use crate::config::types::{OrderDefaults, TradingConfig};

/// Quantity for the ask leg: the bid quantity minus a fixed haircut
/// covering fees, rounded to two decimal places.
pub fn ask_quantity(bid_quantity: Decimal) -> Decimal {
    (bid_quantity * dec!(0.999)).round_dp(2)
}

/// Client id for the bid leg of iteration `i`
fn bid_client_id(iteration: u64) -> u64 {
    2 * iteration
}

/// Client id for the ask leg of iteration `i`
fn ask_client_id(iteration: u64) -> u64 {
    2 * iteration + 1
}

/// Drives the bid/ask round trips against the exchange
pub struct MarketMaker {
    client: BackpackRestClient,
    trading: TradingConfig,
    order_defaults: OrderDefaults,
}

impl MarketMaker {
    pub fn new(
        client: BackpackRestClient,
        trading: TradingConfig,
        order_defaults: OrderDefaults,
    ) -> Self {
        Self {
            client,
            trading,
            order_defaults,
        }
    }

    fn poll_options(&self) -> PollOptions {
        PollOptions {
            interval: Duration::from_millis(self.trading.poll_interval_ms),
            timeout: Duration::from_secs(self.trading.fill_timeout_secs),
        }
    }

    /// Run the configured number of iterations
    ///
    /// Returns early with `Ok(())` when the cancellation token fires;
    /// errors from any leg propagate and end the run.
    #[instrument(skip(self, cancel), fields(symbol = %self.trading.trading_pair))]
    pub async fn run(&self, cancel: &CancellationToken) -> Result<()> {
        let symbol = self.trading.trading_pair.clone();
        let bid_quantity = self.trading.single_order_quantity;
        let ask_qty = ask_quantity(bid_quantity);

        for i in 0..self.trading.iterations {
            if cancel.is_cancelled() {
                info!("Shutdown requested, stopping");
                return Ok(());
            }
            info!(iteration = i, "Starting iteration");

            // Bid leg: cross the spread by lifting the best ask
            let snapshot = self.client.get_depth(&symbol).await?;
            let best_ask = snapshot.best_ask().ok_or_else(|| {
                ClientError::InvalidResponse(format!("Order book for {} has no asks", symbol))
            })?;
            let bid = OrderRequest::builder(&self.order_defaults, &symbol, Side::Bid)
                .price(best_ask.price)
                .quantity(bid_quantity)
                .client_id(bid_client_id(i))
                .build()?;
            if !self.place_and_wait(bid, cancel).await? {
                return Ok(());
            }

            // Ask leg: hit the refreshed best bid
            let snapshot = self.client.get_depth(&symbol).await?;
            let best_bid = snapshot.best_bid().ok_or_else(|| {
                ClientError::InvalidResponse(format!("Order book for {} has no bids", symbol))
            })?;
            let ask = OrderRequest::builder(&self.order_defaults, &symbol, Side::Ask)
                .price(best_bid.price)
                .quantity(ask_qty)
                .client_id(ask_client_id(i))
                .build()?;
            if !self.place_and_wait(ask, cancel).await? {
                return Ok(());
            }

            info!(iteration = i, "Iteration completed");
        }

        info!(
            iterations = self.trading.iterations,
            "All iterations completed"
        );
        Ok(())
    }

    /// Submit one order and wait for its fill.
    /// Returns `false` when shutdown was requested mid-wait.
    async fn place_and_wait(&self, order: OrderRequest, cancel: &CancellationToken) -> Result<bool> {
        let executed = self.client.execute_order(&order).await?;
        info!(
            order_id = %executed.id,
            client_id = order.client_id,
            side = %order.side,
            price = %order.price,
            quantity = %order.quantity,
            "Order submitted"
        );

        match wait_for_fill(
            &self.client,
            order.client_id,
            &order.symbol,
            &self.poll_options(),
            cancel,
        )
        .await?
        {
            FillOutcome::Confirmed => Ok(true),
            FillOutcome::TimedOut => {
                self.client.cancel_open_orders(&order.symbol).await?;
                Err(ClientError::Timeout(format!(
                    "Order {} did not fill within {}s",
                    order.client_id, self.trading.fill_timeout_secs
                )))
            }
            FillOutcome::Cancelled => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_quantity_haircut() {
        assert_eq!(ask_quantity(dec!(10)), dec!(9.99));
        assert_eq!(ask_quantity(dec!(100)), dec!(99.9));
        assert_eq!(ask_quantity(dec!(0.5)), dec!(0.5));
    }

    #[test]
    fn test_client_ids_never_collide() {
        let mut seen = std::collections::HashSet::new();
        for i in 0..100 {
            assert!(seen.insert(bid_client_id(i)));
            assert!(seen.insert(ask_client_id(i)));
        }
    }
}
