//! Order confirmation returned by a (simulated) checkout

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cart::Cart;
use super::product::{deserialize_price, serialize_price};

/// Summary shown after a successful checkout. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub reference: Uuid,
    pub placed_at: DateTime<Utc>,
    /// Distinct cart entries at the time of submission
    pub line_count: usize,
    /// Total units across all entries
    pub item_count: u64,
    #[serde(serialize_with = "serialize_price", deserialize_with = "deserialize_price")]
    pub total: Decimal,
}

impl OrderConfirmation {
    /// Snapshot the cart being checked out
    pub fn for_cart(cart: &Cart) -> Self {
        Self {
            reference: Uuid::new_v4(),
            placed_at: Utc::now(),
            line_count: cart.len(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }

    /// Short reference for display (first 8 hex digits)
    pub fn short_reference(&self) -> String {
        self.reference.simple().to_string()[..8].to_uppercase()
    }
}
