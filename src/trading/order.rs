//! Order construction
//!
//! Orders are immutable values built fresh for every submission: shared
//! defaults come from configuration, per-order fields are set through the
//! builder. Nothing is carried over between iterations.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::errors::{ClientError, Result};
use crate::common::types::{OrderType, Side, TimeInForce};
use crate::config::types::OrderDefaults;

/// A fully specified order, ready to sign and submit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
    pub price: Decimal,
    pub quantity: Decimal,
    pub client_id: u64,
}

impl OrderRequest {
    /// Start building an order from shared defaults
    pub fn builder(
        defaults: &OrderDefaults,
        symbol: impl Into<String>,
        side: Side,
    ) -> OrderBuilder {
        OrderBuilder {
            symbol: symbol.into(),
            side,
            order_type: defaults.order_type,
            time_in_force: defaults.time_in_force,
            price: None,
            quantity: None,
            client_id: None,
        }
    }

    /// Flatten the order into the key/value form the signature covers.
    /// `BTreeMap` iteration yields keys in the lexicographic order the
    /// signing payload requires.
    pub fn to_params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("clientId".to_string(), self.client_id.to_string());
        params.insert("orderType".to_string(), self.order_type.to_string());
        params.insert("price".to_string(), self.price.to_string());
        params.insert("quantity".to_string(), self.quantity.to_string());
        params.insert("side".to_string(), self.side.to_string());
        params.insert("symbol".to_string(), self.symbol.clone());
        params.insert("timeInForce".to_string(), self.time_in_force.to_string());
        params
    }
}

/// Builder for [`OrderRequest`]
#[derive(Debug, Clone)]
pub struct OrderBuilder {
    symbol: String,
    side: Side,
    order_type: OrderType,
    time_in_force: TimeInForce,
    price: Option<Decimal>,
    quantity: Option<Decimal>,
    client_id: Option<u64>,
}

impl OrderBuilder {
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn client_id(mut self, client_id: u64) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    pub fn time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    /// Finish the order; fails if a per-order field was never set
    pub fn build(self) -> Result<OrderRequest> {
        let price = self
            .price
            .ok_or_else(|| ClientError::Internal("order built without a price".to_string()))?;
        let quantity = self
            .quantity
            .ok_or_else(|| ClientError::Internal("order built without a quantity".to_string()))?;
        let client_id = self
            .client_id
            .ok_or_else(|| ClientError::Internal("order built without a client id".to_string()))?;

        Ok(OrderRequest {
            symbol: self.symbol,
            side: self.side,
            order_type: self.order_type,
            time_in_force: self.time_in_force,
            price,
            quantity,
            client_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample_order() -> OrderRequest {
        OrderRequest::builder(&OrderDefaults::default(), "SOL_USDC", Side::Bid)
            .price(dec!(100))
            .quantity(dec!(10))
            .client_id(0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_applies_defaults() {
        let order = sample_order();
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.time_in_force, TimeInForce::Gtc);
        assert_eq!(order.client_id, 0);
    }

    #[test]
    fn test_builder_requires_per_order_fields() {
        let result = OrderRequest::builder(&OrderDefaults::default(), "SOL_USDC", Side::Bid)
            .price(dec!(100))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_params_are_sorted_by_key() {
        let params = sample_order().to_params();
        let keys: Vec<&str> = params.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "clientId",
                "orderType",
                "price",
                "quantity",
                "side",
                "symbol",
                "timeInForce"
            ]
        );
        assert_eq!(params["side"], "Bid");
        assert_eq!(params["quantity"], "10");
    }

    #[test]
    fn test_json_body_round_trip() {
        let order = sample_order();
        let body = serde_json::to_string(&order).unwrap();
        let decoded: OrderRequest = serde_json::from_str(&body).unwrap();
        assert_eq!(decoded, order);
    }

    #[test]
    fn test_json_body_field_names() {
        let body = serde_json::to_value(sample_order()).unwrap();
        assert_eq!(body["symbol"], "SOL_USDC");
        assert_eq!(body["side"], "Bid");
        assert_eq!(body["orderType"], "Limit");
        assert_eq!(body["timeInForce"], "GTC");
        assert_eq!(body["price"], "100");
        assert_eq!(body["clientId"], 0);
    }
}
