//! Checkout - order pricing and settlement
//!
//! The one part of the server with real invariants. Split into pure
//! validation/pricing stages and a settlement orchestrator:
//!
//! - [`cart`] - cart validation and subtotal arithmetic
//! - [`points`] - point-conversion validation
//! - [`vouchers`] - voucher redemption validation and discount math
//! - [`engine`] - reads the stores, runs the stages, commits the atomic
//!   settlement through the order repository
//!
//! Every validation stage runs before any mutation; the commit itself is
//! a single all-or-nothing transaction, and the HTTP response is produced
//! only after it lands.

pub mod cart;
pub mod engine;
pub mod error;
pub mod points;
pub mod vouchers;

pub use engine::{CheckoutEngine, CheckoutRequest, CheckoutLine};
pub use error::CheckoutError;

/// Fixed exchange rate: currency units per loyalty point.
pub const POINT_VALUE: i64 = 500;

/// Subtotal at or above which a settlement awards one loyalty point.
pub const LARGE_ORDER_THRESHOLD: i64 = 100_000;
