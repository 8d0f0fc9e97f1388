//! Customer Feedback Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Feedback ID type
pub type FeedbackId = RecordId;

/// Feedback entry matching the `feedback` table
///
/// The author's email is captured from the account record at submission
/// time, not supplied by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeedbackId>,
    pub email: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Create feedback payload
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackCreate {
    pub title: String,
    pub description: String,
}
