//! Voucher API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::message::NotifyEvent;

use crate::api::convert::VoucherView;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{VoucherCreate, VoucherKind};
use crate::db::repository::VoucherRepository;
use crate::utils::pagination::{Cursor, CursorPage};

#[derive(Debug, Deserialize)]
pub struct VoucherListQuery {
    pub next_cursor: Option<String>,
}

fn validate_voucher(payload: &VoucherCreate) -> AppResult<()> {
    if payload.code.trim().is_empty() {
        return Err(AppError::validation("voucher code must not be empty"));
    }
    if payload.value <= 0 {
        return Err(AppError::validation("voucher value must be positive"));
    }
    if payload.kind == VoucherKind::Percentage && payload.value >= 100 {
        return Err(AppError::validation(
            "percentage voucher value must be below 100",
        ));
    }
    Ok(())
}

/// GET /api/vouchers - available vouchers, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<VoucherListQuery>,
) -> AppResult<Json<CursorPage<VoucherView>>> {
    let cursor = query.next_cursor.as_deref().and_then(Cursor::decode);

    let repo = VoucherRepository::new(state.db.clone());
    let page = repo.list(cursor).await?;

    Ok(Json(CursorPage {
        results: page.results.into_iter().map(Into::into).collect(),
        remaining_results: page.remaining,
        next_cursor: page.next_cursor,
    }))
}

/// GET /api/vouchers/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<VoucherView>> {
    let repo = VoucherRepository::new(state.db.clone());
    let voucher = repo
        .find_by_id(&id)
        .await?
        .filter(|v| v.is_available)
        .ok_or_else(|| AppError::not_found(format!("Voucher {id}")))?;
    Ok(Json(voucher.into()))
}

/// POST /api/vouchers - create and broadcast (staff only)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<VoucherCreate>,
) -> AppResult<Json<VoucherView>> {
    user.require_staff()?;
    validate_voucher(&payload)?;

    let repo = VoucherRepository::new(state.db.clone());
    let voucher = repo.create(payload).await?;
    tracing::info!(code = %voucher.code, "voucher created");

    let view = VoucherView::from(voucher);
    state.notify.broadcast(NotifyEvent::VoucherCreated, &view);
    Ok(Json(view))
}

/// DELETE /api/vouchers/:id - soft-delete (staff only)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    user.require_staff()?;

    let repo = VoucherRepository::new(state.db.clone());
    repo.soft_delete(&id).await?;
    Ok(Json(ApiResponse::ok_with_message("Voucher deleted")))
}
