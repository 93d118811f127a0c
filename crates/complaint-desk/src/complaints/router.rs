use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{ComplaintDraft, ComplaintId, Submitter};
use super::notifier::ComplaintNotifier;
use super::repository::ComplaintRepository;
use super::service::{ComplaintService, ComplaintServiceError};
use super::validation::parse_filter;

/// Submission payload. Attribution fields are supplied by the signed-in client.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitComplaintRequest {
    #[serde(flatten)]
    pub draft: ComplaintDraft,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
}

impl SubmitComplaintRequest {
    fn into_parts(self) -> (ComplaintDraft, Submitter) {
        let submitter = Submitter {
            id: self.user_id,
            name: self.user_name,
            email: self.user_email,
        };
        (self.draft, submitter)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListComplaintsQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: Option<String>,
}

/// Router builder exposing complaint intake and administration endpoints.
pub fn complaint_router<R, N>(service: Arc<ComplaintService<R, N>>) -> Router
where
    R: ComplaintRepository + 'static,
    N: ComplaintNotifier + 'static,
{
    Router::new()
        .route(
            "/api/complaints",
            post(submit_handler::<R, N>).get(list_handler::<R, N>),
        )
        .route(
            "/api/complaints/:complaint_id",
            get(get_handler::<R, N>)
                .patch(update_status_handler::<R, N>)
                .delete(delete_handler::<R, N>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<ComplaintService<R, N>>>,
    axum::Json(request): axum::Json<SubmitComplaintRequest>,
) -> Response
where
    R: ComplaintRepository + 'static,
    N: ComplaintNotifier + 'static,
{
    let (draft, submitter) = request.into_parts();
    match service.submit(draft, submitter).await {
        Ok(complaint) => (StatusCode::CREATED, axum::Json(complaint)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R, N>(
    State(service): State<Arc<ComplaintService<R, N>>>,
    Query(query): Query<ListComplaintsQuery>,
) -> Response
where
    R: ComplaintRepository + 'static,
    N: ComplaintNotifier + 'static,
{
    let filter = match parse_filter(query.status.as_deref(), query.priority.as_deref()) {
        Ok(filter) => filter,
        Err(err) => return error_response(err.into()),
    };

    match service.list(&filter).await {
        Ok(complaints) => (StatusCode::OK, axum::Json(complaints)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_handler<R, N>(
    State(service): State<Arc<ComplaintService<R, N>>>,
    Path(complaint_id): Path<String>,
) -> Response
where
    R: ComplaintRepository + 'static,
    N: ComplaintNotifier + 'static,
{
    match service.get(&ComplaintId(complaint_id)).await {
        Ok(complaint) => (StatusCode::OK, axum::Json(complaint)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_status_handler<R, N>(
    State(service): State<Arc<ComplaintService<R, N>>>,
    Path(complaint_id): Path<String>,
    axum::Json(request): axum::Json<UpdateStatusRequest>,
) -> Response
where
    R: ComplaintRepository + 'static,
    N: ComplaintNotifier + 'static,
{
    let id = ComplaintId(complaint_id);
    let status = request.status.unwrap_or_default();
    match service.update_status(&id, &status).await {
        Ok(complaint) => (StatusCode::OK, axum::Json(complaint)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R, N>(
    State(service): State<Arc<ComplaintService<R, N>>>,
    Path(complaint_id): Path<String>,
) -> Response
where
    R: ComplaintRepository + 'static,
    N: ComplaintNotifier + 'static,
{
    match service.delete(&ComplaintId(complaint_id)).await {
        Ok(()) => {
            let payload = json!({ "message": "Complaint deleted successfully" });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: ComplaintServiceError) -> Response {
    match err {
        ComplaintServiceError::Validation(error) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field,
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        ComplaintServiceError::NotFound(_) => {
            let payload = json!({ "error": "Complaint not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        ComplaintServiceError::Storage(error) => {
            error!(error = %error, "complaint storage failure");
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
