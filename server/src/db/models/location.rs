//! Delivery Location Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Location ID type
pub type LocationId = RecordId;

/// Delivery location matching the `location` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LocationId>,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Create location payload (staff only)
#[derive(Debug, Clone, Deserialize)]
pub struct LocationCreate {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}
