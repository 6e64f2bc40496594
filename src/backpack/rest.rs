//! REST API client for the Backpack exchange

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use tracing::{debug, instrument};

use super::instructions::Instruction;
use super::messages::{DepthResponse, ExecutedOrder};
use super::signer::{encode_params, RequestSigner};
use crate::common::errors::{ClientError, Result};
use crate::common::types::{Balance, MarketSnapshot, OrderState, PriceLevel};
use crate::trading::order::OrderRequest;

/// REST API client for the Backpack exchange
///
/// Public endpoints work without credentials; authenticated endpoints
/// require a [`RequestSigner`] attached via [`with_signer`](Self::with_signer).
#[derive(Debug, Clone)]
pub struct BackpackRestClient {
    /// HTTP client
    client: Client,
    /// Base URL for the exchange API
    base_url: String,
    /// Signature validity window in milliseconds
    window_ms: u32,
    /// Optional signer for authenticated endpoints
    signer: Option<RequestSigner>,
}

/// Translate the order-query transport status into lifecycle state.
///
/// The exchange signals a fill by absence: the open-order endpoint returns
/// 404 once the order has left the book, and 200/202 with the order body
/// while it is still resting. An exchange-side cancellation is therefore
/// indistinguishable from a fill at this surface. Anything outside
/// {200, 202, 404} maps to `None` and must surface as an error.
pub fn order_state_from_status(status: u16) -> Option<OrderState> {
    match status {
        200 | 202 => Some(OrderState::Pending),
        404 => Some(OrderState::Filled),
        _ => None,
    }
}

impl BackpackRestClient {
    /// Create a new REST client (unauthenticated)
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a new REST client with custom timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            window_ms: 5000,
            signer: None,
        })
    }

    /// Attach a signer for authenticated requests
    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Override the signature validity window
    pub fn with_window(mut self, window_ms: u32) -> Self {
        self.window_ms = window_ms;
        self
    }

    fn signer(&self) -> Result<&RequestSigner> {
        self.signer.as_ref().ok_or_else(|| {
            ClientError::Authentication("No API credentials configured".to_string())
        })
    }

    fn apply_auth(
        &self,
        request: reqwest::RequestBuilder,
        signature: &str,
        timestamp: i64,
    ) -> reqwest::RequestBuilder {
        let api_key = self.signer.as_ref().map(|s| s.api_key()).unwrap_or("");
        request
            .header("X-API-KEY", api_key)
            .header("X-SIGNATURE", signature)
            .header("X-TIMESTAMP", timestamp.to_string())
            .header("X-WINDOW", self.window_ms.to_string())
    }

    // ========================================================================
    // Public Endpoints (No Authentication Required)
    // ========================================================================

    /// Get the order book for a trading pair
    #[instrument(skip(self))]
    pub async fn get_depth(&self, symbol: &str) -> Result<MarketSnapshot> {
        let url = format!("{}/depth?symbol={}", self.base_url, symbol);
        debug!("Fetching depth from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::InvalidResponse(format!(
                "Server returned status {}: {}",
                status, body
            )));
        }

        let depth: DepthResponse = response.json().await?;
        convert_depth_response(symbol, depth)
    }

    // ========================================================================
    // Authenticated Endpoints
    // ========================================================================

    /// Submit an order for execution
    ///
    /// On a non-2xx status no order was created and the caller must not
    /// assume otherwise.
    #[instrument(skip(self, order), fields(client_id = order.client_id, side = %order.side))]
    pub async fn execute_order(&self, order: &OrderRequest) -> Result<ExecutedOrder> {
        let signer = self.signer()?;
        let params = order.to_params();
        let timestamp = now_millis();
        let signature = signer.sign(Instruction::OrderExecute, timestamp, self.window_ms, &params);

        let url = format!(
            "{}/order?instruction={}&{}&timestamp={}&window={}",
            self.base_url,
            Instruction::OrderExecute,
            encode_params(&params),
            timestamp,
            self.window_ms
        );
        debug!("Submitting order to: {}", url);

        let request = self.client.post(&url).json(order);
        let response = self.apply_auth(request, &signature, timestamp).send().await?;

        let status = response.status();
        if status.as_u16() == 200 || status.as_u16() == 202 {
            let executed: ExecutedOrder = response.json().await?;
            Ok(executed)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::OrderRejected {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Query whether an order is still on the book
    #[instrument(skip(self))]
    pub async fn query_order(&self, client_id: u64, symbol: &str) -> Result<OrderState> {
        let signer = self.signer()?;
        let mut params = BTreeMap::new();
        params.insert("clientId".to_string(), client_id.to_string());
        params.insert("symbol".to_string(), symbol.to_string());

        let timestamp = now_millis();
        let signature = signer.sign(Instruction::OrderQuery, timestamp, self.window_ms, &params);

        let url = format!(
            "{}/order?instruction={}&{}",
            self.base_url,
            Instruction::OrderQuery,
            encode_params(&params)
        );
        debug!("Querying order at: {}", url);

        let request = self.client.get(&url);
        let response = self.apply_auth(request, &signature, timestamp).send().await?;

        let status = response.status().as_u16();
        match order_state_from_status(status) {
            Some(state) => Ok(state),
            None => {
                let body = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status, body })
            }
        }
    }

    /// Cancel all open orders for a trading pair
    #[instrument(skip(self))]
    pub async fn cancel_open_orders(&self, symbol: &str) -> Result<()> {
        let signer = self.signer()?;
        let mut params = BTreeMap::new();
        params.insert("symbol".to_string(), symbol.to_string());

        let timestamp = now_millis();
        let signature =
            signer.sign(Instruction::OrderCancelAll, timestamp, self.window_ms, &params);

        let url = format!("{}/orders?symbol={}", self.base_url, symbol);
        debug!("Cancelling open orders at: {}", url);

        let request = self.client.delete(&url).json(&params);
        let response = self.apply_auth(request, &signature, timestamp).send().await?;

        let status = response.status();
        if status.as_u16() == 200 || status.as_u16() == 202 {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::InvalidResponse(format!(
                "Server returned status {}: {}",
                status, body
            )))
        }
    }

    /// Get per-asset balances (informational only)
    #[instrument(skip(self))]
    pub async fn get_balances(&self) -> Result<BTreeMap<String, Balance>> {
        let signer = self.signer()?;
        let timestamp = now_millis();
        let signature =
            signer.sign(Instruction::BalanceQuery, timestamp, self.window_ms, &BTreeMap::new());

        let url = format!(
            "{}/assets?timestamp={}&window={}",
            self.base_url, timestamp, self.window_ms
        );
        debug!("Fetching balances from: {}", url);

        let request = self.client.get(&url);
        let response = self.apply_auth(request, &signature, timestamp).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::InvalidResponse(format!(
                "Server returned status {}: {}",
                status, body
            )));
        }

        let balances: BTreeMap<String, Balance> = response.json().await?;
        Ok(balances)
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert the wire depth response into a unified MarketSnapshot
///
/// The wire format carries both sides ascending by price; bids are reversed
/// so the best bid comes first.
fn convert_depth_response(symbol: &str, response: DepthResponse) -> Result<MarketSnapshot> {
    let parse_level = |level: &[String; 2], side: &str| -> Result<PriceLevel> {
        Ok(PriceLevel {
            price: level[0].parse().map_err(|e| {
                ClientError::InvalidResponse(format!("Invalid {} price: {}", side, e))
            })?,
            quantity: level[1].parse().map_err(|e| {
                ClientError::InvalidResponse(format!("Invalid {} quantity: {}", side, e))
            })?,
        })
    };

    let asks: Result<Vec<PriceLevel>> = response
        .asks
        .iter()
        .map(|level| parse_level(level, "ask"))
        .collect();

    let mut bids: Vec<PriceLevel> = response
        .bids
        .iter()
        .map(|level| parse_level(level, "bid"))
        .collect::<Result<_>>()?;
    bids.reverse();

    Ok(MarketSnapshot {
        symbol: symbol.to_string(),
        bids,
        asks: asks?,
        timestamp: Utc::now(),
    })
}
