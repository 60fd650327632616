//! Checkout hand-off payload.
//!
//! This is what a payment flow would receive; nothing here talks to a gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{CurrencyCode, Entity, Money, ProductId, SessionId};

use crate::cart::CartLineItem;
use crate::quantity::Quantity;
use crate::totals::Totals;

/// One priced line of a checkout payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: Quantity,
    pub line_total: Money,
}

impl From<&CartLineItem> for CheckoutLine {
    fn from(item: &CartLineItem) -> Self {
        Self {
            product_id: item.id().clone(),
            name: item.product().name().to_string(),
            unit_price: item.product().price(),
            quantity: item.qty(),
            line_total: item.line_total(),
        }
    }
}

/// Snapshot of the cart at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPayload {
    pub session_id: SessionId,
    pub currency: CurrencyCode,
    pub lines: Vec<CheckoutLine>,
    pub totals: Totals,
    pub created_at: DateTime<Utc>,
}

impl CheckoutPayload {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
