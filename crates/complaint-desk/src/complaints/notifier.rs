use async_trait::async_trait;

use super::domain::Complaint;

/// Outbound notification hooks fired after a complaint is created or its status changes.
#[async_trait]
pub trait ComplaintNotifier: Send + Sync {
    async fn notify_created(&self, complaint: &Complaint) -> Result<(), NotificationError>;

    async fn notify_status_changed(&self, complaint: &Complaint) -> Result<(), NotificationError>;
}

/// Notification failure. Logged by the service and never returned to callers.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
    #[error("notification could not be built: {0}")]
    Message(String),
}

/// Scheduling of notifications relative to the committed state change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationDispatch {
    /// Await delivery before returning; failures are logged and swallowed.
    #[default]
    Inline,
    /// Spawn delivery onto the runtime and return immediately. Tasks are not tracked, so
    /// deliveries still pending at runtime shutdown are dropped without a log line.
    Detached,
}

impl NotificationDispatch {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "inline" => Some(Self::Inline),
            "detached" | "background" => Some(Self::Detached),
            _ => None,
        }
    }
}

/// Which lifecycle event a notification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Created,
    StatusChanged,
}

impl NotificationKind {
    pub fn label(self) -> &'static str {
        match self {
            NotificationKind::Created => "created",
            NotificationKind::StatusChanged => "status_changed",
        }
    }
}

pub(crate) async fn deliver<N>(
    notifier: &N,
    kind: NotificationKind,
    complaint: &Complaint,
) -> Result<(), NotificationError>
where
    N: ComplaintNotifier + ?Sized,
{
    match kind {
        NotificationKind::Created => notifier.notify_created(complaint).await,
        NotificationKind::StatusChanged => notifier.notify_status_changed(complaint).await,
    }
}
