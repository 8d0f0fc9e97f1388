//! Checkout error taxonomy
//!
//! Every variant is request-level and recoverable: validation errors
//! abort before any mutation, and a settlement conflict aborts the whole
//! transaction. None of these ever crash the process.

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::repository::RepoError;

#[derive(Debug, Error)]
pub enum CheckoutError {
    // ==================== Cart validation ====================
    #[error("There is no item in this order")]
    EmptyCart,

    #[error("Item {0} does not exist")]
    ItemNotFound(String),

    #[error("Item {0} is not available")]
    ItemUnavailable(String),

    #[error("Not enough stock for {name}: wanted {wanted}, available {available}")]
    InsufficientStock {
        name: String,
        wanted: i64,
        available: i64,
    },

    #[error("Quantity for item {0} must be positive")]
    InvalidQuantity(String),

    // ==================== Points validation ====================
    #[error("Please enter a valid positive converted points")]
    InvalidAmount,

    #[error("You do not have enough points to convert: requested {requested}, balance {balance}")]
    InsufficientPoints { requested: i64, balance: i64 },

    // ==================== Voucher validation ====================
    #[error("Voucher with code {0} is not available")]
    VoucherNotFound(String),

    #[error("Voucher with code {0} was already used")]
    VoucherAlreadyUsed(String),

    #[error("Voucher code {0} appears more than once in this order")]
    InvalidVoucherList(String),

    // ==================== Settlement ====================
    #[error("This account does not exist")]
    AccountNotFound,

    /// The atomic commit hit a concurrent update and was rolled back.
    /// The caller may retry the whole order; the engine never retries on
    /// its own so client-visible side effects stay idempotent.
    #[error("The order hit a concurrent update, please retry")]
    SettlementConflict,

    #[error("Storage error: {0}")]
    Storage(RepoError),
}

impl From<RepoError> for CheckoutError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Conflict(_) => Self::SettlementConflict,
            other => Self::Storage(other),
        }
    }
}

impl CheckoutError {
    /// Error code this variant maps to on the wire.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyCart => ErrorCode::EmptyCart,
            Self::ItemNotFound(_) => ErrorCode::ItemNotFound,
            Self::ItemUnavailable(_) => ErrorCode::ItemUnavailable,
            Self::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            Self::InvalidQuantity(_) => ErrorCode::ValidationFailed,
            Self::InvalidAmount => ErrorCode::InvalidAmount,
            Self::InsufficientPoints { .. } => ErrorCode::InsufficientPoints,
            Self::VoucherNotFound(_) => ErrorCode::VoucherNotFound,
            Self::VoucherAlreadyUsed(_) => ErrorCode::VoucherAlreadyUsed,
            Self::InvalidVoucherList(_) => ErrorCode::InvalidVoucherList,
            Self::AccountNotFound => ErrorCode::ValidationFailed,
            Self::SettlementConflict => ErrorCode::SettlementConflict,
            Self::Storage(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match &err {
            // Storage details stay in the log, not on the wire
            CheckoutError::Storage(inner) => {
                tracing::error!(error = %inner, "settlement storage failure");
                AppError::new(ErrorCode::DatabaseError)
            }
            _ => AppError::with_message(err.code(), err.to_string()),
        }
    }
}
