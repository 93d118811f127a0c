//! E-mail rendering and delivery for complaint notifications.

mod smtp;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::complaints::{Complaint, ComplaintNotifier, NotificationError};

pub use smtp::SmtpMailTransport;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Rendered HTML message ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid mailbox '{address}': {reason}")]
    Address { address: String, reason: String },
    #[error("message could not be built: {0}")]
    Build(String),
    #[error("smtp delivery failed: {0}")]
    Transport(String),
}

impl From<MailError> for NotificationError {
    fn from(value: MailError) -> Self {
        match value {
            MailError::Transport(reason) => NotificationError::Transport(reason),
            other => NotificationError::Message(other.to_string()),
        }
    }
}

/// Sends admin e-mails for new complaints and status changes.
pub struct MailNotifier<T: ?Sized> {
    transport: Arc<T>,
    from: String,
    admin: String,
}

impl<T> MailNotifier<T>
where
    T: MailTransport + ?Sized,
{
    pub fn new(transport: Arc<T>, from: impl Into<String>, admin: impl Into<String>) -> Self {
        Self {
            transport,
            from: from.into(),
            admin: admin.into(),
        }
    }

    pub fn created_message(&self, complaint: &Complaint) -> MailMessage {
        MailMessage {
            from: self.from.clone(),
            to: self.admin.clone(),
            subject: format!("New Complaint Submitted: {}", complaint.title),
            html: format!(
                "<h2>New Complaint Submitted</h2>\n\
                 <p><strong>Title:</strong> {}</p>\n\
                 <p><strong>Category:</strong> {}</p>\n\
                 <p><strong>Priority:</strong> {}</p>\n\
                 <p><strong>Description:</strong> {}</p>\n\
                 <p><strong>Submitted:</strong> {}</p>\n",
                escape_html(&complaint.title),
                complaint.category.label(),
                complaint.priority.label(),
                escape_html(&complaint.description),
                complaint.submitted_at.format(TIMESTAMP_FORMAT),
            ),
        }
    }

    pub fn status_changed_message(
        &self,
        complaint: &Complaint,
        updated_at: DateTime<Utc>,
    ) -> MailMessage {
        MailMessage {
            from: self.from.clone(),
            to: self.admin.clone(),
            subject: format!("Complaint Status Updated: {}", complaint.title),
            html: format!(
                "<h2>Complaint Status Updated</h2>\n\
                 <p><strong>Title:</strong> {}</p>\n\
                 <p><strong>New Status:</strong> {}</p>\n\
                 <p><strong>Updated:</strong> {}</p>\n",
                escape_html(&complaint.title),
                complaint.status.label(),
                updated_at.format(TIMESTAMP_FORMAT),
            ),
        }
    }
}

#[async_trait]
impl<T> ComplaintNotifier for MailNotifier<T>
where
    T: MailTransport + ?Sized + 'static,
{
    async fn notify_created(&self, complaint: &Complaint) -> Result<(), NotificationError> {
        let message = self.created_message(complaint);
        self.transport.send(&message).await?;
        Ok(())
    }

    async fn notify_status_changed(&self, complaint: &Complaint) -> Result<(), NotificationError> {
        let message = self.status_changed_message(complaint, Utc::now());
        self.transport.send(&message).await?;
        Ok(())
    }
}

/// Transport that only logs the message envelope. Used when SMTP is not configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailTransport;

#[async_trait]
impl MailTransport for LogMailTransport {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "mail delivery skipped (smtp not configured)"
        );
        Ok(())
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
