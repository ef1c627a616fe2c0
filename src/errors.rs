use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::services::link_gateway::GatewayError;

/// A lightweight wrapper for HTTP errors that keeps the message local.
///
/// `code` is a stable machine-readable signal; UIs key their messages off
/// it, so every distinct failure condition gets its own code.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    /// Create a new AppError with a specific status, code, and message.
    pub fn new(status: StatusCode, code: &'static str, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: msg.into(),
        }
    }

    /// Shortcut for a 500 Internal Server Error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
    }

    /// Shortcut for 404 Not Found.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", msg)
    }

    /// Shortcut for 401 Unauthorized.
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", msg)
    }

    /// Shortcut for 403 Forbidden.
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "forbidden", msg)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
            "code": self.code,
            "status": self.status.as_u16()
        }));

        (self.status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err.to_string())
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match &err {
            GatewayError::LinkNotFound(_) => {
                AppError::new(StatusCode::NOT_FOUND, "link_not_found", err.to_string())
            }
            GatewayError::TargetNotFound(_) => {
                AppError::new(StatusCode::NOT_FOUND, "target_not_found", err.to_string())
            }
            GatewayError::NotPasswordProtected(_) => AppError::new(
                StatusCode::BAD_REQUEST,
                "not_password_protected",
                err.to_string(),
            ),
            GatewayError::PasswordMissing => AppError::new(
                StatusCode::BAD_REQUEST,
                "password_missing",
                err.to_string(),
            ),
            GatewayError::WrongPassword => {
                AppError::new(StatusCode::FORBIDDEN, "wrong_password", err.to_string())
            }
            GatewayError::Password(_)
            | GatewayError::ContentStore(_)
            | GatewayError::Transfer(_)
            | GatewayError::Sqlx(_) => {
                tracing::error!(error = %err, "request failed on a collaborator");
                AppError::internal("internal server error")
            }
        }
    }
}
