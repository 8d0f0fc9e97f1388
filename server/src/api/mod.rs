//! API routes
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - registration, login, profile
//! - [`accounts`] - account lookup and profile edits
//! - [`items`] - item catalog
//! - [`orders`] - checkout and the fulfillment queue
//! - [`vouchers`] - voucher management and broadcast
//! - [`locations`] - delivery locations
//! - [`feedbacks`] - customer feedback
//! - [`notify`] - live notification WebSocket

pub mod convert;

pub mod accounts;
pub mod auth;
pub mod feedbacks;
pub mod health;
pub mod items;
pub mod locations;
pub mod notify;
pub mod orders;
pub mod vouchers;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// HTTP request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    tracing::info!(target: "http_access", "{} {} {}", method, uri, response.status());

    response
}

/// Assemble the full application router.
pub fn build_app(state: ServerState) -> Router {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(accounts::router())
        .merge(items::router())
        .merge(orders::router())
        .merge(vouchers::router())
        .merge(locations::router())
        .merge(feedbacks::router())
        .merge(notify::router())
        // require_auth skips the public routes itself
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}
