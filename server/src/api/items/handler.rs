//! Item catalog API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, AppResult, ApiResponse};

use crate::api::convert::ItemView;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Category, ItemCreate, ItemUpdate};
use crate::db::repository::ItemRepository;
use crate::utils::pagination::{Cursor, CursorPage};

#[derive(Debug, Deserialize)]
pub struct ItemListQuery {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub next_cursor: Option<String>,
}

fn validate_item_fields(name: &str, price: i64, quantity: i64, image: Option<&str>) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("item name must not be empty"));
    }
    if price < 0 {
        return Err(AppError::validation("price must not be negative"));
    }
    if quantity < 0 {
        return Err(AppError::validation("quantity must not be negative"));
    }
    if let Some(image) = image
        && image != "default"
        && !image.starts_with("https://")
    {
        return Err(AppError::validation("image must be an https URL"));
    }
    Ok(())
}

/// GET /api/items - browse the catalog (any authenticated account)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ItemListQuery>,
) -> AppResult<Json<CursorPage<ItemView>>> {
    let cursor = query.next_cursor.as_deref().and_then(Cursor::decode);

    let repo = ItemRepository::new(state.db.clone());
    let page = repo.list(query.name, query.category, cursor).await?;

    Ok(Json(CursorPage {
        results: page.results.into_iter().map(Into::into).collect(),
        remaining_results: page.remaining,
        next_cursor: page.next_cursor,
    }))
}

/// GET /api/items/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ItemView>> {
    let repo = ItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Item {id}")))?;
    Ok(Json(item.into()))
}

/// POST /api/items - add a catalog item (staff only)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ItemCreate>,
) -> AppResult<Json<ItemView>> {
    user.require_staff()?;
    validate_item_fields(
        &payload.name,
        payload.price,
        payload.quantity,
        payload.image.as_deref(),
    )?;

    let repo = ItemRepository::new(state.db.clone());
    let item = repo.create(payload).await?;
    tracing::info!(name = %item.name, "item created");
    Ok(Json(item.into()))
}

/// PUT /api/items/:id - full update (staff only)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ItemUpdate>,
) -> AppResult<Json<ItemView>> {
    user.require_staff()?;
    validate_item_fields(
        &payload.name,
        payload.price,
        payload.quantity,
        Some(&payload.image),
    )?;

    let repo = ItemRepository::new(state.db.clone());
    let item = repo.update(&id, payload).await?;
    Ok(Json(item.into()))
}

/// DELETE /api/items/:id - soft-delete (staff only)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    user.require_staff()?;

    let repo = ItemRepository::new(state.db.clone());
    repo.soft_delete(&id).await?;
    Ok(Json(ApiResponse::ok_with_message("Item deleted")))
}
