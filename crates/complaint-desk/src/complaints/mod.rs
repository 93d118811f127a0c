//! Complaint intake and review lifecycle.
//!
//! Complaints are created `Pending` and may then move freely between `Pending`, `In Progress`,
//! and `Resolved`. Creation and status changes fire best-effort notifications; a failed
//! notification is logged and never undoes or fails the committed change.

pub mod domain;
pub mod notifier;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Category, Complaint, ComplaintDraft, ComplaintFields, ComplaintFilter, ComplaintId,
    ComplaintPatch, ComplaintStatus, NewComplaint, Priority, Submitter,
};
pub use notifier::{ComplaintNotifier, NotificationDispatch, NotificationError, NotificationKind};
pub use repository::{ComplaintRepository, RepositoryError};
pub use router::complaint_router;
pub use service::{ComplaintService, ComplaintServiceError};
pub use validation::{parse_filter, parse_status, validate_draft, FieldProblem, ValidationError};
