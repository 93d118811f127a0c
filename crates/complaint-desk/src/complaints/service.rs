use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::domain::{
    Complaint, ComplaintDraft, ComplaintFilter, ComplaintId, ComplaintPatch, ComplaintStatus,
    NewComplaint, Submitter,
};
use super::notifier::{deliver, ComplaintNotifier, NotificationDispatch, NotificationKind};
use super::repository::{ComplaintRepository, RepositoryError};
use super::validation::{parse_status, validate_draft, ValidationError};

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Owns the complaint status lifecycle on top of a repository and a notifier.
///
/// Every operation is a single unit of work against the repository. Notifications run only
/// after the repository has committed, and their outcome never reaches the caller.
pub struct ComplaintService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    dispatch: NotificationDispatch,
    clock: Clock,
}

impl<R, N> ComplaintService<R, N>
where
    R: ComplaintRepository + 'static,
    N: ComplaintNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            repository,
            notifier,
            dispatch: NotificationDispatch::Inline,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_dispatch(mut self, dispatch: NotificationDispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Validate and persist a new complaint. Status always starts at `Pending`.
    pub async fn submit(
        &self,
        draft: ComplaintDraft,
        submitter: Submitter,
    ) -> Result<Complaint, ComplaintServiceError> {
        let fields = validate_draft(&draft)?;
        let record = NewComplaint {
            fields,
            status: ComplaintStatus::Pending,
            submitted_at: (self.clock)(),
            submitter,
        };

        let id = self.repository.insert(record.clone()).await?;
        let complaint = record.into_complaint(id);
        info!(
            complaint_id = %complaint.id,
            category = complaint.category.label(),
            priority = complaint.priority.label(),
            "complaint submitted"
        );

        self.notify(NotificationKind::Created, &complaint).await;
        Ok(complaint)
    }

    /// Move a complaint to `status`. Any status may follow any other.
    pub async fn update_status(
        &self,
        id: &ComplaintId,
        status: &str,
    ) -> Result<Complaint, ComplaintServiceError> {
        let status = parse_status(Some(status))?;
        let complaint = self
            .repository
            .update_fields(id, ComplaintPatch::status(status))
            .await?
            .ok_or_else(|| ComplaintServiceError::NotFound(id.clone()))?;
        info!(complaint_id = %id, status = status.label(), "complaint status updated");

        self.notify(NotificationKind::StatusChanged, &complaint).await;
        Ok(complaint)
    }

    /// Permanently remove a complaint. No notification is sent.
    pub async fn delete(&self, id: &ComplaintId) -> Result<(), ComplaintServiceError> {
        if !self.repository.delete(id).await? {
            return Err(ComplaintServiceError::NotFound(id.clone()));
        }
        info!(complaint_id = %id, "complaint deleted");
        Ok(())
    }

    /// Complaints matching `filter`, most recently submitted first.
    pub async fn list(
        &self,
        filter: &ComplaintFilter,
    ) -> Result<Vec<Complaint>, ComplaintServiceError> {
        let mut complaints = self.repository.find_many(filter).await?;
        complaints.sort_by(|left, right| {
            right
                .submitted_at
                .cmp(&left.submitted_at)
                .then_with(|| left.id.cmp(&right.id))
        });
        debug!(count = complaints.len(), ?filter, "complaints listed");
        Ok(complaints)
    }

    pub async fn get(&self, id: &ComplaintId) -> Result<Complaint, ComplaintServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ComplaintServiceError::NotFound(id.clone()))
    }

    async fn notify(&self, kind: NotificationKind, complaint: &Complaint) {
        match self.dispatch {
            NotificationDispatch::Inline => {
                report_delivery(&*self.notifier, kind, complaint).await;
            }
            NotificationDispatch::Detached => {
                let notifier = Arc::clone(&self.notifier);
                let complaint = complaint.clone();
                tokio::spawn(async move {
                    report_delivery(&*notifier, kind, &complaint).await;
                });
            }
        }
    }
}

async fn report_delivery<N>(notifier: &N, kind: NotificationKind, complaint: &Complaint)
where
    N: ComplaintNotifier + ?Sized,
{
    match deliver(notifier, kind, complaint).await {
        Ok(()) => debug!(
            complaint_id = %complaint.id,
            kind = kind.label(),
            "complaint notification sent"
        ),
        Err(err) => warn!(
            complaint_id = %complaint.id,
            kind = kind.label(),
            error = %err,
            "complaint notification failed; continuing"
        ),
    }
}

/// Error raised by the complaint service.
#[derive(Debug, thiserror::Error)]
pub enum ComplaintServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("complaint {0} not found")]
    NotFound(ComplaintId),
    #[error("complaint storage failed: {0}")]
    Storage(#[from] RepositoryError),
}
