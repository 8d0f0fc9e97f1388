//! Shared types for the verdura grocery backend
//!
//! Common types used by the server crate and future clients: the unified
//! error system, live notification messages and the account role type.

pub mod error;
pub mod message;
pub mod types;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use message::{NotifyEvent, NotifyMessage};
pub use types::Role;
