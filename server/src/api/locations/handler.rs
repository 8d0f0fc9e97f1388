//! Delivery location API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{ApiResponse, AppError, AppResult};

use crate::api::convert::LocationView;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::LocationCreate;
use crate::db::repository::LocationRepository;

fn validate_location(payload: &LocationCreate) -> AppResult<()> {
    if payload.address.trim().is_empty() {
        return Err(AppError::validation("address must not be empty"));
    }
    if !(-90.0..=90.0).contains(&payload.latitude) {
        return Err(AppError::validation("latitude out of range"));
    }
    if !(-180.0..=180.0).contains(&payload.longitude) {
        return Err(AppError::validation("longitude out of range"));
    }
    Ok(())
}

/// GET /api/locations - all available delivery locations
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<LocationView>>> {
    let repo = LocationRepository::new(state.db.clone());
    let locations = repo.find_all().await?;
    Ok(Json(locations.into_iter().map(Into::into).collect()))
}

/// POST /api/locations - add a delivery location (staff only)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<LocationCreate>,
) -> AppResult<Json<LocationView>> {
    user.require_staff()?;
    validate_location(&payload)?;

    let repo = LocationRepository::new(state.db.clone());
    let location = repo.create(payload).await?;
    Ok(Json(location.into()))
}

/// DELETE /api/locations/:id - soft-delete (staff only)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    user.require_staff()?;

    let repo = LocationRepository::new(state.db.clone());
    repo.soft_delete(&id).await?;
    Ok(Json(ApiResponse::ok_with_message("Location deleted")))
}
