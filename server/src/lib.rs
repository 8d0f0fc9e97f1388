//! Verdura Server - grocery ordering backend
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/       # configuration, state, HTTP server lifecycle
//! ├── auth/       # JWT authentication, role policy
//! ├── api/        # HTTP routes and handlers
//! ├── checkout/   # order pricing and atomic settlement (the core)
//! ├── db/         # embedded SurrealDB models and repositories
//! ├── notify/     # live notification registry
//! └── utils/      # logging, pagination
//! ```
//!
//! The checkout module carries the real invariants: every order is
//! priced against a snapshot read and committed as a single transaction
//! that debits points, consumes vouchers and decrements stock together.

pub mod api;
pub mod auth;
pub mod checkout;
pub mod core;
pub mod db;
pub mod notify;
pub mod utils;

// Re-export the common types
pub use auth::{CurrentUser, JwtService, RolePolicy};
pub use checkout::{CheckoutEngine, CheckoutError, CheckoutRequest};
pub use core::{Config, Server, ServerState};
pub use notify::NotifyService;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
pub use utils::setup_environment;
