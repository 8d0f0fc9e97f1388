//! Cursor pagination helpers
//!
//! List endpoints page with an opaque cursor: base64 of
//! `"{created_at_rfc3339}_{record_id}"`, pointing at the last result of
//! the previous page. The creation timestamp orders the page and the
//! record id breaks ties.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde::Serialize;
use surrealdb::RecordId;

/// Decoded pagination cursor
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    /// Creation timestamp of the boundary record (RFC 3339 text, compared
    /// lexicographically — the same representation records are stored with)
    pub created_at: String,
    /// Record id of the boundary record, e.g. `item:x1`
    pub id: String,
}

impl Cursor {
    /// Encode a boundary record into an opaque cursor string.
    pub fn encode(created_at: &DateTime<Utc>, id: &RecordId) -> String {
        use chrono::SecondsFormat;
        let raw = format!(
            "{}_{}",
            created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            id
        );
        BASE64.encode(raw)
    }

    /// Decode an opaque cursor. Returns `None` for anything malformed; a
    /// bad cursor simply restarts the listing from the first page.
    pub fn decode(raw: &str) -> Option<Self> {
        let bytes = BASE64.decode(raw).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        // The timestamp never contains '_', the record id may not either,
        // but split only on the first occurrence to be safe.
        let (created_at, id) = text.split_once('_')?;
        if created_at.is_empty() || id.is_empty() {
            return None;
        }
        Some(Self {
            created_at: created_at.to_string(),
            id: id.to_string(),
        })
    }
}

/// One page of list results, in the wire layout clients consume.
#[derive(Debug, Clone, Serialize)]
pub struct CursorPage<T> {
    pub results: Vec<T>,
    #[serde(rename = "remainingResults")]
    pub remaining_results: i64,
    pub next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_garbage() {
        assert_eq!(Cursor::decode("not-base64!!"), None);
        let no_separator = BASE64.encode("2024-01-01T00:00:00Z");
        assert_eq!(Cursor::decode(&no_separator), None);
    }

    #[test]
    fn encode_then_decode() {
        let at: DateTime<Utc> = "2024-05-01T10:20:30.123Z".parse().unwrap();
        let id: RecordId = "item:abc123".parse().unwrap();
        let cursor = Cursor::decode(&Cursor::encode(&at, &id)).unwrap();
        assert_eq!(cursor.id, "item:abc123");
        assert!(cursor.created_at.starts_with("2024-05-01T10:20:30"));
    }
}
