//! Account API module

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/accounts", account_routes())
}

fn account_routes() -> Router<ServerState> {
    Router::new()
        .route("/me", patch(handler::update_me))
        .route("/{id}", get(handler::get_by_id))
}
