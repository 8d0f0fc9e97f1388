//! Account API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::error::{AppError, AppResult};
use validator::Validate;

use crate::api::convert::AccountProfile;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::AccountRepository;

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileUpdatePayload {
    #[validate(length(min = 3, max = 22, message = "username must be 3-22 characters"))]
    pub username: Option<String>,
    pub avatar: Option<String>,
}

/// Avatar must be an https URL or the bundled placeholder.
fn validate_avatar(avatar: &str) -> Result<(), AppError> {
    if avatar == "default" || avatar.starts_with("https://") {
        Ok(())
    } else {
        Err(AppError::validation("avatar must be an https URL"))
    }
}

/// GET /api/accounts/:id - account lookup (staff only)
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AccountProfile>> {
    user.require_staff()?;

    let repo = AccountRepository::new(state.db.clone());
    let account = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Account {id}")))?;
    Ok(Json(account.into()))
}

/// PATCH /api/accounts/me - edit own profile fields
pub async fn update_me(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProfileUpdatePayload>,
) -> AppResult<Json<AccountProfile>> {
    payload
        .validate()
        .map_err(|_| AppError::validation("username must be 3-22 characters"))?;
    if let Some(ref avatar) = payload.avatar {
        validate_avatar(avatar)?;
    }
    if payload.username.is_none() && payload.avatar.is_none() {
        return Err(AppError::validation("nothing to update"));
    }

    let repo = AccountRepository::new(state.db.clone());
    let account = repo
        .update_profile(&user.account_id, payload.username, payload.avatar)
        .await?;
    Ok(Json(account.into()))
}
