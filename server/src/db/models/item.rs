//! Item Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Item ID type
pub type ItemId = RecordId;

/// Closed set of grocery categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Vegetable,
    Meat,
    Fruit,
    Dairy,
    Canned,
    Snack,
    Drink,
    Spice,
    Household,
    PersonalHygiene,
}

/// Item model matching the `item` table
///
/// `quantity` is mutated only by order settlement; staff edits go through
/// the full-update endpoint and never touch stock directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub name: String,
    pub description: String,
    /// Unit price in whole currency units
    pub price: i64,
    pub category: Category,
    #[serde(default = "default_image")]
    pub image: String,
    /// Stock on hand
    pub quantity: i64,
    /// Soft-delete marker; unavailable items cannot be ordered
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

fn default_image() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

/// Create item payload (staff only)
#[derive(Debug, Clone, Deserialize)]
pub struct ItemCreate {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub category: Category,
    pub image: Option<String>,
    pub quantity: i64,
}

/// Full-update item payload (staff only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub category: Category,
    pub image: String,
    pub quantity: i64,
}
