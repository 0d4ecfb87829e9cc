// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Admin privileges required")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// The point-card API key is not configured. Must be checked before
    /// any outbound call so the upstream is never contacted.
    #[error("Point-card API key is not configured")]
    MissingApiKey,

    /// Non-2xx from the point-card function, passed through verbatim
    /// (status and body) so the caller sees the upstream-reported reason.
    #[error("Point-card function returned HTTP {status}")]
    LoyaltyApi {
        status: StatusCode,
        body: serde_json::Value,
    },

    /// Non-2xx from the point-card function on the fetch path. The body
    /// is replaced with a generic failure but the status is preserved.
    #[error("Point-card fetch failed with HTTP {0}")]
    LoyaltyFetch(StatusCode),

    /// Network failure or malformed response from the point-card function.
    #[error("Point-card function unreachable: {0}")]
    LoyaltyUnavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.as_str(), None),
            AppError::MissingApiKey => {
                tracing::error!("POINT_CARD_API_KEY is not set");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error",
                    None,
                )
            }
            AppError::LoyaltyApi { status, body } => {
                // Upstream status and body are surfaced verbatim. The body
                // already follows the {error: "..."} convention (see
                // LoyaltyClient::passthrough_error).
                return (*status, Json(body.clone())).into_response();
            }
            AppError::LoyaltyFetch(status) => (*status, "Failed to fetch data", None),
            AppError::LoyaltyUnavailable(msg) => {
                tracing::error!(error = %msg, "Point-card function unreachable");
                (StatusCode::BAD_GATEWAY, "Failed to fetch data", None)
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    None,
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
