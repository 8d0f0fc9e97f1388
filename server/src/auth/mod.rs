//! Authentication and authorization
//!
//! - [`JwtService`] - token issuing and validation
//! - [`CurrentUser`] - authenticated caller context
//! - [`require_auth`] - bearer-token middleware
//! - [`RolePolicy`] - staff allow-list applied at registration

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod role_policy;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
pub use role_policy::{RolePolicy, StaffEntry};
