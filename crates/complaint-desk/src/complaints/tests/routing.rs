use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::complaints::router::{submit_handler, SubmitComplaintRequest};
use crate::complaints::{complaint_router, ComplaintService};

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn submit_route_creates_pending_complaint() {
    let (service, _, notifier) = build_service();
    let router = complaint_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/complaints",
            json!({
                "title": "Late delivery",
                "description": "Order arrived a week late.",
                "category": "Service",
                "priority": "Medium",
                "status": "Resolved",
                "userId": "user-1",
                "userName": "Demo User",
                "userEmail": "user@demo.com"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], json!("Pending"));
    assert_eq!(payload["submitterName"], json!("Demo User"));
    assert!(payload["id"].as_str().is_some());
    assert!(payload["submittedAt"].as_str().is_some());
    assert_eq!(notifier.events().len(), 1);
}

#[tokio::test]
async fn submit_handler_reports_offending_field() {
    let (service, _, _) = build_service();
    let request = SubmitComplaintRequest {
        draft: {
            let mut draft = draft();
            draft.category = Some("Billing".to_string());
            draft
        },
        ..SubmitComplaintRequest::default()
    };

    let response = submit_handler(State(Arc::new(service)), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["field"], json!("category"));
}

#[tokio::test]
async fn submit_handler_returns_internal_error_on_storage_failure() {
    let service = Arc::new(ComplaintService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryNotifier::default()),
    ));
    let request = SubmitComplaintRequest {
        draft: draft(),
        ..SubmitComplaintRequest::default()
    };

    let response = submit_handler(State(service), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn patch_route_updates_status_and_handles_missing_records() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    let complaint = service
        .submit(draft(), Default::default())
        .await
        .expect("submission succeeds");
    let router = complaint_router(service);

    let response = router
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/complaints/{}", complaint.id),
            json!({ "status": "In Progress" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], json!("In Progress"));
    assert_eq!(payload["title"], json!(complaint.title));

    let response = router
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/complaints/{}", complaint.id),
            json!({}),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = router
        .oneshot(json_request(
            "PATCH",
            "/api/complaints/does-not-exist",
            json!({ "status": "Resolved" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_route_filters_by_query() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    for (title, priority) in [("one", "High"), ("two", "Low"), ("three", "High")] {
        service
            .submit(draft_with(title, priority), Default::default())
            .await
            .expect("submission succeeds");
    }
    let router = complaint_router(service);

    let response = router
        .clone()
        .oneshot(empty_request(
            "GET",
            "/api/complaints?status=Pending&priority=High",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let titles: Vec<_> = payload
        .as_array()
        .expect("array payload")
        .iter()
        .filter_map(|entry| entry["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["three", "one"]);

    let response = router
        .oneshot(empty_request("GET", "/api/complaints?priority=Urgent"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_route_removes_complaint_once() {
    let (service, repository, _) = build_service();
    let service = Arc::new(service);
    let complaint = service
        .submit(draft(), Default::default())
        .await
        .expect("submission succeeds");
    let router = complaint_router(service);
    let uri = format!("/api/complaints/{}", complaint.id);

    let response = router
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["message"], json!("Complaint deleted successfully"));
    assert_eq!(repository.len(), 0);

    let response = router
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .oneshot(empty_request("GET", &uri))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
