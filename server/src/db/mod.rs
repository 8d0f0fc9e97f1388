//! Database Module
//!
//! Embedded SurrealDB storage. The server runs on the RocksDB engine
//! under the configured work directory; tests use the in-memory engine.

pub mod models;
pub mod repository;

use shared::error::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "verdura";
const DATABASE: &str = "main";

/// Open the embedded database under `<work_dir>/database`.
pub async fn connect(work_dir: &str) -> Result<Surreal<Db>, AppError> {
    let path = format!("{work_dir}/database");
    let db = Surreal::new::<RocksDb>(path.as_str())
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

    tracing::info!(path = %path, "Database connection established (SurrealDB embedded)");
    Ok(db)
}

/// Open an in-memory database. Used by integration tests.
pub async fn connect_memory() -> Result<Surreal<Db>, AppError> {
    let db = Surreal::new::<Mem>(())
        .await
        .map_err(|e| AppError::database(format!("Failed to open memory database: {e}")))?;

    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

    Ok(db)
}
