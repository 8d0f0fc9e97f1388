//! Live notification messages
//!
//! Events pushed to subscribed WebSocket connections. The only producer
//! today is voucher creation; the envelope is generic so further events
//! can reuse it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Notification event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyEvent {
    /// A new voucher became available
    VoucherCreated,
}

impl fmt::Display for NotifyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VoucherCreated => write!(f, "voucher_created"),
        }
    }
}

/// Envelope broadcast to every subscribed connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyMessage {
    pub event: NotifyEvent,
    pub payload: serde_json::Value,
    pub sent_at: DateTime<Utc>,
}

impl NotifyMessage {
    /// Build a message from any serializable payload.
    ///
    /// Serialization failures are reported by the caller; the sink itself
    /// is fire-and-forget.
    pub fn new<T: Serialize>(event: NotifyEvent, payload: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event,
            payload: serde_json::to_value(payload)?,
            sent_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_name_is_stable() {
        // Connected clients dispatch on this string
        assert_eq!(NotifyEvent::VoucherCreated.to_string(), "voucher_created");
    }
}
