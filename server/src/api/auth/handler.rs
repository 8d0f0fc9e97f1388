//! Auth API handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use validator::Validate;

use crate::api::convert::{AccountProfile, option_record_id_to_string};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Account;
use crate::db::repository::AccountRepository;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(length(min = 3, max = 22, message = "username must be 3-22 characters"))]
    pub username: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AccountProfile,
}

fn validate_username_charset(username: &str) -> Result<(), AppError> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Ok(())
    } else {
        Err(AppError::validation(
            "username may only contain letters, digits and underscores",
        ))
    }
}

fn validation_error(errors: validator::ValidationErrors) -> AppError {
    let message = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "validation failed".to_string());
    AppError::validation(message)
}

fn issue_token(state: &ServerState, account: &Account) -> AppResult<String> {
    let account_id = option_record_id_to_string(&account.id)
        .ok_or_else(|| AppError::internal("account has no record id"))?;
    state
        .jwt_service
        .generate_token(&account_id, &account.username, account.role)
        .map_err(|e| AppError::internal(format!("token generation failed: {e}")))
}

/// POST /api/auth/register - create an account and sign in
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterPayload>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate().map_err(validation_error)?;
    validate_username_charset(&payload.username)?;

    let role = state.role_policy.classify(&payload.username, &payload.email);
    let hash_pass = Account::hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))?;

    let repo = AccountRepository::new(state.db.clone());
    let account = repo
        .create(
            payload.username,
            payload.email,
            payload.phone,
            hash_pass,
            role,
        )
        .await?;

    tracing::info!(username = %account.username, role = %account.role, "account registered");

    let token = issue_token(&state, &account)?;
    Ok(Json(AuthResponse {
        token,
        user: account.into(),
    }))
}

/// POST /api/auth/login - verify credentials and issue a token
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginPayload>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate().map_err(validation_error)?;

    let repo = AccountRepository::new(state.db.clone());
    let account = repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let valid = account
        .verify_password(&payload.password)
        .map_err(|e| AppError::internal(format!("password verification failed: {e}")))?;
    if !valid {
        tracing::warn!(email = %payload.email, "failed login attempt");
        return Err(AppError::invalid_credentials());
    }

    let token = issue_token(&state, &account)?;
    Ok(Json(AuthResponse {
        token,
        user: account.into(),
    }))
}

/// GET /api/auth/me - profile of the authenticated account
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AccountProfile>> {
    let repo = AccountRepository::new(state.db.clone());
    let account = repo
        .find_by_id(&user.account_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Account {}", user.account_id)))?;
    Ok(Json(account.into()))
}
