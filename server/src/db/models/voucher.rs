//! Voucher Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Voucher ID type
pub type VoucherId = RecordId;

/// Discount shape of a voucher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherKind {
    /// Fixed point-equivalent value: discount = value × POINT_VALUE
    Points,
    /// Percentage of the pre-discount subtotal, value < 100
    Percentage,
}

/// Voucher model matching the `voucher` table
///
/// Code uniqueness is enforced only among available vouchers; a
/// soft-deleted voucher may leave a duplicate code behind. Consumption is
/// tracked on the account, the voucher record itself is never mutated by
/// settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voucher {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<VoucherId>,
    pub code: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: VoucherKind,
    pub value: i64,
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Create voucher payload (staff only)
#[derive(Debug, Clone, Deserialize)]
pub struct VoucherCreate {
    pub code: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: VoucherKind,
    pub value: i64,
}
