//! Feedback API handlers

use axum::{Json, extract::State};
use shared::error::{AppError, AppResult};

use crate::api::convert::FeedbackView;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::FeedbackCreate;
use crate::db::repository::{AccountRepository, FeedbackRepository};

/// GET /api/feedbacks - all feedback, newest first (staff only)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<FeedbackView>>> {
    user.require_staff()?;

    let repo = FeedbackRepository::new(state.db.clone());
    let feedbacks = repo.find_all().await?;
    Ok(Json(feedbacks.into_iter().map(Into::into).collect()))
}

/// POST /api/feedbacks - leave feedback; the sender email comes from the
/// authenticated account, not the payload
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<FeedbackCreate>,
) -> AppResult<Json<FeedbackView>> {
    if payload.title.trim().is_empty() || payload.description.trim().is_empty() {
        return Err(AppError::validation("title and description are required"));
    }

    let accounts = AccountRepository::new(state.db.clone());
    let account = accounts
        .find_by_id(&user.account_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Account {}", user.account_id)))?;

    let repo = FeedbackRepository::new(state.db.clone());
    let feedback = repo
        .create(account.email, payload.title, payload.description)
        .await?;
    Ok(Json(feedback.into()))
}
