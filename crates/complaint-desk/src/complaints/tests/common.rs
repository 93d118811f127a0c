use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::complaints::domain::{
    Complaint, ComplaintDraft, ComplaintFilter, ComplaintId, ComplaintPatch, NewComplaint,
};
use crate::complaints::notifier::{ComplaintNotifier, NotificationError, NotificationKind};
use crate::complaints::repository::{ComplaintRepository, RepositoryError};
use crate::complaints::ComplaintService;

pub(super) fn draft() -> ComplaintDraft {
    ComplaintDraft::new(
        "Blender arrived cracked",
        "The jar was split along the seam when I opened the box.",
        "Product",
        "High",
    )
}

pub(super) fn draft_with(title: &str, priority: &str) -> ComplaintDraft {
    ComplaintDraft::new(title, "details", "Service", priority)
}

/// Clock that advances one minute per call so submissions have distinct timestamps.
pub(super) fn ticking_clock() -> impl Fn() -> DateTime<Utc> + Send + Sync + 'static {
    let base = Utc
        .with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    let ticks = AtomicI64::new(0);
    move || base + Duration::minutes(ticks.fetch_add(1, Ordering::Relaxed))
}

pub(super) fn build_service() -> (
    ComplaintService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = ComplaintService::new(repository.clone(), notifier.clone())
        .with_clock(ticking_clock());
    (service, repository, notifier)
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<ComplaintId, Complaint>>,
    sequence: AtomicU64,
}

impl MemoryRepository {
    pub(super) fn snapshot(&self, id: &ComplaintId) -> Option<Complaint> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(id)
            .cloned()
    }

    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

#[async_trait]
impl ComplaintRepository for MemoryRepository {
    async fn insert(&self, complaint: NewComplaint) -> Result<ComplaintId, RepositoryError> {
        let id = ComplaintId(format!(
            "cmp-{:04}",
            self.sequence.fetch_add(1, Ordering::Relaxed) + 1
        ));
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(id.clone(), complaint.into_complaint(id.clone()));
        Ok(id)
    }

    async fn find_by_id(&self, id: &ComplaintId) -> Result<Option<Complaint>, RepositoryError> {
        Ok(self.snapshot(id))
    }

    async fn find_many(
        &self,
        filter: &ComplaintFilter,
    ) -> Result<Vec<Complaint>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|complaint| filter.matches(complaint))
            .cloned()
            .collect())
    }

    async fn update_fields(
        &self,
        id: &ComplaintId,
        patch: ComplaintPatch,
    ) -> Result<Option<Complaint>, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get_mut(id).map(|complaint| {
            patch.apply(complaint);
            complaint.clone()
        }))
    }

    async fn delete(&self, id: &ComplaintId) -> Result<bool, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.remove(id).is_some())
    }
}

pub(super) struct UnavailableRepository;

#[async_trait]
impl ComplaintRepository for UnavailableRepository {
    async fn insert(&self, _complaint: NewComplaint) -> Result<ComplaintId, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn find_by_id(&self, _id: &ComplaintId) -> Result<Option<Complaint>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn find_many(
        &self,
        _filter: &ComplaintFilter,
    ) -> Result<Vec<Complaint>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn update_fields(
        &self,
        _id: &ComplaintId,
        _patch: ComplaintPatch,
    ) -> Result<Option<Complaint>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn delete(&self, _id: &ComplaintId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    events: Mutex<Vec<(NotificationKind, Complaint)>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<(NotificationKind, Complaint)> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

#[async_trait]
impl ComplaintNotifier for MemoryNotifier {
    async fn notify_created(&self, complaint: &Complaint) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push((NotificationKind::Created, complaint.clone()));
        Ok(())
    }

    async fn notify_status_changed(&self, complaint: &Complaint) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push((NotificationKind::StatusChanged, complaint.clone()));
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct FailingNotifier {
    pub(super) attempts: AtomicU64,
}

#[async_trait]
impl ComplaintNotifier for FailingNotifier {
    async fn notify_created(&self, _complaint: &Complaint) -> Result<(), NotificationError> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        Err(NotificationError::Transport("smtp relay refused".to_string()))
    }

    async fn notify_status_changed(&self, _complaint: &Complaint) -> Result<(), NotificationError> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        Err(NotificationError::Transport("smtp relay refused".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
