//! Repository Module
//!
//! CRUD operations for the SurrealDB tables. Each repository is a thin
//! clone-cheap wrapper around the shared connection; the only multi-record
//! write path is [`order::OrderRepository::settle`].

pub mod account;
pub mod feedback;
pub mod item;
pub mod location;
pub mod order;
pub mod voucher;

pub use account::AccountRepository;
pub use feedback::FeedbackRepository;
pub use item::ItemRepository;
pub use location::LocationRepository;
pub use order::{OrderRepository, SettlementPlan};
pub use voucher::VoucherRepository;

use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Concurrent-update conflict inside an atomic commit; the caller may
    /// retry the whole operation.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for shared::error::AppError {
    fn from(err: RepoError) -> Self {
        use shared::error::{AppError, ErrorCode};
        match err {
            RepoError::NotFound(what) => {
                AppError::with_message(ErrorCode::NotFound, format!("{what} not found"))
            }
            RepoError::Duplicate(what) => {
                AppError::with_message(ErrorCode::AlreadyExists, format!("{what} already exists"))
            }
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Conflict(_) => AppError::new(ErrorCode::SettlementConflict),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Parse a client-supplied id into a record id for `table`.
///
/// Accepts both the full `table:key` form and a bare key. A full id naming
/// a different table is rejected.
pub fn parse_record_id(table: &str, raw: &str) -> RepoResult<RecordId> {
    if raw.contains(':') {
        let id: RecordId = raw
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid id format: {raw}")))?;
        if id.table() != table {
            return Err(RepoError::Validation(format!(
                "Expected a {table} id, got: {raw}"
            )));
        }
        Ok(id)
    } else {
        Ok(RecordId::from_table_key(table, raw))
    }
}

/// Row shape of a `SELECT count() ... GROUP ALL` query
#[derive(Debug, Deserialize)]
pub(crate) struct CountRow {
    pub count: i64,
}
