//! Error category classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of errors by domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General request errors (validation, not found, ...)
    General,
    /// Authentication errors
    Auth,
    /// Permission errors
    Permission,
    /// Order checkout and settlement errors
    Checkout,
    /// System errors (database, internal)
    System,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Checkout => "checkout",
            Self::System => "system",
        };
        write!(f, "{name}")
    }
}
