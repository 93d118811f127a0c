use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::repository::AccountRepository;
use super::service::{AccountService, LoginError};

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Router builder exposing password login and demo account seeding.
pub fn account_router<R>(service: Arc<AccountService<R>>) -> Router
where
    R: AccountRepository + 'static,
{
    Router::new()
        .route("/api/auth/login", post(login_handler::<R>))
        .route("/api/auth/seed-users", post(seed_users_handler::<R>))
        .with_state(service)
}

pub(crate) async fn login_handler<R>(
    State(service): State<Arc<AccountService<R>>>,
    axum::Json(request): axum::Json<LoginRequest>,
) -> Response
where
    R: AccountRepository + 'static,
{
    let email = request.email.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    match service.login(&email, &password).await {
        Ok(user) => {
            let payload = json!({ "message": "Login successful", "user": user });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err @ LoginError::MissingCredentials) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(err @ LoginError::InvalidCredentials) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
        }
        Err(LoginError::Storage(err)) => {
            error!(error = %err, "login lookup failed");
            let payload = json!({ "error": "Failed to login" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn seed_users_handler<R>(
    State(service): State<Arc<AccountService<R>>>,
) -> Response
where
    R: AccountRepository + 'static,
{
    match service.seed_demo_users().await {
        Ok(report) => {
            let payload = json!({
                "message": report.message(),
                "created": report.created,
                "existing": report.existing,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => {
            error!(error = %err, "demo account seeding failed");
            let payload = json!({ "error": "Failed to create demo users" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
