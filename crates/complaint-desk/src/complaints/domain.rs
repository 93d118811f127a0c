use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the repository on insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplaintId(pub String);

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Area of the business the complaint is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Product,
    Service,
    Support,
}

impl Category {
    pub const LABELS: &'static [&'static str] = &["Product", "Service", "Support"];

    pub fn label(self) -> &'static str {
        match self {
            Category::Product => "Product",
            Category::Service => "Service",
            Category::Support => "Support",
        }
    }

    /// Case-sensitive match against [`Category::LABELS`].
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Product" => Some(Category::Product),
            "Service" => Some(Category::Service),
            "Support" => Some(Category::Support),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const LABELS: &'static [&'static str] = &["Low", "Medium", "High"];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Low" => Some(Priority::Low),
            "Medium" => Some(Priority::Medium),
            "High" => Some(Priority::High),
            _ => None,
        }
    }
}

/// Review state of a complaint. Every state may move to every other state, including
/// reopening a resolved complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComplaintStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    pub const LABELS: &'static [&'static str] = &["Pending", "In Progress", "Resolved"];

    pub fn label(self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "Pending",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::Resolved => "Resolved",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Pending" => Some(ComplaintStatus::Pending),
            "In Progress" => Some(ComplaintStatus::InProgress),
            "Resolved" => Some(ComplaintStatus::Resolved),
            _ => None,
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity of the caller submitting a complaint, supplied per request by the HTTP layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submitter {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Submitter {
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Raw, unvalidated complaint fields as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

impl ComplaintDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        priority: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            category: Some(category.into()),
            priority: Some(priority.into()),
        }
    }
}

/// Validated complaint content, ready to be stamped and persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintFields {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
}

/// Record handed to the repository on insert; the repository assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComplaint {
    pub fields: ComplaintFields,
    pub status: ComplaintStatus,
    pub submitted_at: DateTime<Utc>,
    pub submitter: Submitter,
}

impl NewComplaint {
    pub fn into_complaint(self, id: ComplaintId) -> Complaint {
        let ComplaintFields {
            title,
            description,
            category,
            priority,
        } = self.fields;

        Complaint {
            id,
            title,
            description,
            category,
            priority,
            status: self.status,
            submitted_at: self.submitted_at,
            submitter_id: self.submitter.id,
            submitter_name: self.submitter.name,
            submitter_email: self.submitter.email,
        }
    }
}

/// Persisted complaint as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: ComplaintId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: ComplaintStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_email: Option<String>,
}

/// Exact-match filter for listings. Absent fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplaintFilter {
    pub status: Option<ComplaintStatus>,
    pub priority: Option<Priority>,
}

impl ComplaintFilter {
    pub fn matches(&self, complaint: &Complaint) -> bool {
        self.status.map_or(true, |status| complaint.status == status)
            && self
                .priority
                .map_or(true, |priority| complaint.priority == priority)
    }
}

/// Partial update applied by the repository. Only the status is mutable after creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplaintPatch {
    pub status: Option<ComplaintStatus>,
}

impl ComplaintPatch {
    pub fn status(status: ComplaintStatus) -> Self {
        Self {
            status: Some(status),
        }
    }

    pub fn apply(&self, complaint: &mut Complaint) {
        if let Some(status) = self.status {
            complaint.status = status;
        }
    }
}
