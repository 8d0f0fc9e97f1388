//! Point-conversion validation
//!
//! Pure stage: checks the requested conversion against the balance read
//! at the start of checkout and prices it at the fixed exchange rate.
//! The settlement transaction re-checks the balance under its own guard,
//! so a stale read here can only abort the commit.

use super::POINT_VALUE;
use super::error::CheckoutError;

/// Validate a point conversion and return its discount contribution.
pub fn validate_points(converted_points: i64, balance: i64) -> Result<i64, CheckoutError> {
    if converted_points < 0 {
        return Err(CheckoutError::InvalidAmount);
    }
    if converted_points > balance {
        return Err(CheckoutError::InsufficientPoints {
            requested: converted_points,
            balance,
        });
    }
    Ok(converted_points * POINT_VALUE)
}
