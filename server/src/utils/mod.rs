//! Utility modules
//!
//! - [`logger`] - tracing setup
//! - [`pagination`] - opaque cursor encoding for list endpoints

pub mod logger;
pub mod pagination;

pub use logger::init_logger;
pub use pagination::{Cursor, CursorPage};

// Re-export the unified error types so handlers can import everything
// from one place.
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};

/// Set up the process environment: dotenv plus logging.
///
/// Called once from `main` before anything else touches the config.
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    logger::init_logger_with_file(None, log_dir.as_deref());
}
