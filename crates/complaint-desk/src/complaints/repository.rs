use async_trait::async_trait;

use super::domain::{Complaint, ComplaintFilter, ComplaintId, ComplaintPatch, NewComplaint};

/// Storage collaborator for complaint records.
///
/// Implementations assign a unique id on insert. Concurrent updates to the same record are
/// last-write-wins; the service performs no version checks.
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    async fn insert(&self, complaint: NewComplaint) -> Result<ComplaintId, RepositoryError>;

    async fn find_by_id(&self, id: &ComplaintId) -> Result<Option<Complaint>, RepositoryError>;

    /// Records matching `filter`. Ordering is not required; the service sorts the result.
    async fn find_many(
        &self,
        filter: &ComplaintFilter,
    ) -> Result<Vec<Complaint>, RepositoryError>;

    /// Apply `patch` and return the updated record, or `None` when the id is unknown.
    async fn update_fields(
        &self,
        id: &ComplaintId,
        patch: ComplaintPatch,
    ) -> Result<Option<Complaint>, RepositoryError>;

    /// Remove the record. Returns `false` when nothing was deleted.
    async fn delete(&self, id: &ComplaintId) -> Result<bool, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
