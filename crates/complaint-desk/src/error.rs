use crate::accounts::AccountServiceError;
use crate::complaints::ComplaintServiceError;
use crate::config::ConfigError;
use crate::credentials::CredentialError;
use crate::mail::MailError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Top-level error for the binary and for handlers that surface startup-class failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("mail setup error: {0}")]
    Mail(#[from] MailError),
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),
    #[error("account error: {0}")]
    Accounts(#[from] AccountServiceError),
    #[error("complaint error: {0}")]
    Complaints(#[from] ComplaintServiceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Complaints(ComplaintServiceError::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::Complaints(ComplaintServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Mail(_)
            | AppError::Credential(_)
            | AppError::Accounts(_)
            | AppError::Complaints(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
