//! Order API handlers
//!
//! Order creation delegates everything to the checkout engine; the
//! handler only does role checks and wire conversion.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, AppResult};

use crate::api::convert::OrderView;
use crate::auth::CurrentUser;
use crate::checkout::{CheckoutEngine, CheckoutRequest};
use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::utils::pagination::{Cursor, CursorPage};

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    #[serde(default)]
    pub is_fulfilled: bool,
    pub next_cursor: Option<String>,
}

/// POST /api/orders - place an order (customer only)
///
/// The response is produced only after the settlement transaction has
/// committed; a failed checkout leaves every store untouched.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<OrderView>> {
    user.require_customer()?;

    let engine = CheckoutEngine::new(state.db.clone());
    let order = engine.place_order(&user.account_id, payload).await?;
    Ok(Json(order.into()))
}

/// GET /api/orders - fulfillment queue (staff only)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<CursorPage<OrderView>>> {
    user.require_staff()?;

    let cursor = query.next_cursor.as_deref().and_then(Cursor::decode);
    let repo = OrderRepository::new(state.db.clone());
    let page = repo.list(query.is_fulfilled, cursor).await?;

    Ok(Json(CursorPage {
        results: page.results.into_iter().map(Into::into).collect(),
        remaining_results: page.remaining,
        next_cursor: page.next_cursor,
    }))
}

/// GET /api/orders/:id - order detail (owner or staff)
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<OrderView>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .filter(|o| o.is_available)
        .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;

    if !user.is_staff() && order.customer.to_string() != user.account_id {
        return Err(AppError::forbidden("Not your order"));
    }
    Ok(Json(order.into()))
}

/// POST /api/orders/:id/fulfill - mark fulfilled (staff only)
pub async fn fulfill(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<OrderView>> {
    user.require_staff()?;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo.fulfill(&id).await?;
    Ok(Json(order.into()))
}

/// DELETE /api/orders/:id - soft-delete (staff only)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    user.require_staff()?;

    let repo = OrderRepository::new(state.db.clone());
    repo.soft_delete(&id).await?;
    Ok(Json(ApiResponse::ok_with_message("Order deleted")))
}
