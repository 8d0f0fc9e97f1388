//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::account::AccountId;
use super::item::ItemId;
use super::voucher::VoucherId;

/// Order ID type
pub type OrderId = RecordId;

/// One settled cart line
///
/// `unit_price` is the price captured at validation time; later catalog
/// edits never alter a historical order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub item: ItemId,
    pub quantity: i64,
    pub unit_price: i64,
}

/// Order model matching the `order` table
///
/// Append-only: created once per successful checkout, immutable afterward
/// except for the fulfillment flag and the soft-delete marker. All entity
/// references are non-owning ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    pub customer: AccountId,
    pub order_items: Vec<OrderLine>,
    pub subtotal: i64,
    pub converted_points: i64,
    pub voucher_applied: Vec<VoucherId>,
    pub discount: i64,
    /// `max(0, subtotal - discount)` — never negative
    pub total: i64,
    #[serde(default)]
    pub is_fulfilled: bool,
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}
