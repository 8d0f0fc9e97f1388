//! Axum integration for the unified error type

use axum::Json;
use axum::response::{IntoResponse, Response};

use super::types::{ApiResponse, AppError};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Internal details are logged, not exposed to the caller
        if self.http_status().is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "request failed");
        }

        let body = ApiResponse::error(&self);
        (self.http_status(), Json(body)).into_response()
    }
}
