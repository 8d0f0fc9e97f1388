//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Checkout errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ErrorCategory;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient
/// serialization and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,

    // ==================== 4xxx: Checkout ====================
    /// Cart contains no lines
    EmptyCart = 4001,
    /// Referenced item does not exist
    ItemNotFound = 4002,
    /// Item exists but is soft-deleted
    ItemUnavailable = 4003,
    /// Requested quantity exceeds current stock
    InsufficientStock = 4004,
    /// Converted points amount is not a non-negative integer
    InvalidAmount = 4005,
    /// Converted points exceed the account balance
    InsufficientPoints = 4006,
    /// No available voucher matches the code
    VoucherNotFound = 4007,
    /// Voucher was already consumed by this account
    VoucherAlreadyUsed = 4008,
    /// Duplicate voucher codes within one request
    InvalidVoucherList = 4009,
    /// Concurrent-update conflict during the atomic commit (retryable)
    SettlementConflict = 4010,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Category this code belongs to
    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            0..=999 => ErrorCategory::General,
            1000..=1999 => ErrorCategory::Auth,
            2000..=2999 => ErrorCategory::Permission,
            4000..=4999 => ErrorCategory::Checkout,
            _ => ErrorCategory::System,
        }
    }

    /// Default human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid email or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",
            Self::PermissionDenied => "Permission denied",
            Self::RoleRequired => "This action requires a different role",
            Self::EmptyCart => "There is no item in this order",
            Self::ItemNotFound => "This item does not exist",
            Self::ItemUnavailable => "This item is not available",
            Self::InsufficientStock => "Not enough stock for this item",
            Self::InvalidAmount => "Please enter a valid positive converted points",
            Self::InsufficientPoints => "You do not have enough points to convert",
            Self::VoucherNotFound => "This voucher is not available",
            Self::VoucherAlreadyUsed => "This voucher was already used",
            Self::InvalidVoucherList => "Duplicate voucher codes in the request",
            Self::SettlementConflict => "The order hit a concurrent update, please retry",
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
        }
    }

    /// HTTP status code this error maps to
    pub fn http_status(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Self::Success => StatusCode::OK,
            Self::NotFound | Self::ItemNotFound | Self::VoucherNotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::SettlementConflict => StatusCode::CONFLICT,
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied | Self::RoleRequired => StatusCode::FORBIDDEN,
            Self::InternalError | Self::DatabaseError | Self::Unknown => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error raised when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            2001 => Self::PermissionDenied,
            2002 => Self::RoleRequired,
            4001 => Self::EmptyCart,
            4002 => Self::ItemNotFound,
            4003 => Self::ItemUnavailable,
            4004 => Self::InsufficientStock,
            4005 => Self::InvalidAmount,
            4006 => Self::InsufficientPoints,
            4007 => Self::VoucherNotFound,
            4008 => Self::VoucherAlreadyUsed,
            4009 => Self::InvalidVoucherList,
            4010 => Self::SettlementConflict,
            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
