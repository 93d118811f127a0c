use super::domain::{
    Category, ComplaintDraft, ComplaintFields, ComplaintFilter, ComplaintStatus, Priority,
};
use crate::validation::{bounded_text, enum_value, non_empty};

pub use crate::validation::{FieldProblem, ValidationError};

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Check a draft in field order (title, description, category, priority) and return the
/// typed fields. The first offending field is reported.
pub fn validate_draft(draft: &ComplaintDraft) -> Result<ComplaintFields, ValidationError> {
    let title = bounded_text("title", draft.title.as_deref(), TITLE_MAX_CHARS)?;
    let description = bounded_text(
        "description",
        draft.description.as_deref(),
        DESCRIPTION_MAX_CHARS,
    )?;
    let category = enum_value(
        "category",
        draft.category.as_deref(),
        Category::LABELS,
        Category::parse,
    )?;
    let priority = enum_value(
        "priority",
        draft.priority.as_deref(),
        Priority::LABELS,
        Priority::parse,
    )?;

    Ok(ComplaintFields {
        title,
        description,
        category,
        priority,
    })
}

pub fn parse_status(raw: Option<&str>) -> Result<ComplaintStatus, ValidationError> {
    enum_value("status", raw, ComplaintStatus::LABELS, ComplaintStatus::parse)
}

/// Build a listing filter from optional query values. Empty values mean "no filter".
pub fn parse_filter(
    status: Option<&str>,
    priority: Option<&str>,
) -> Result<ComplaintFilter, ValidationError> {
    let status = non_empty(status)
        .map(|raw| parse_status(Some(raw)))
        .transpose()?;
    let priority = non_empty(priority)
        .map(|raw| enum_value("priority", Some(raw), Priority::LABELS, Priority::parse))
        .transpose()?;

    Ok(ComplaintFilter { status, priority })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ComplaintDraft {
        ComplaintDraft::new("A", "d", "Product", "Low")
    }

    #[test]
    fn accepts_minimal_draft() {
        let fields = validate_draft(&draft()).expect("valid draft");
        assert_eq!(fields.title, "A");
        assert_eq!(fields.category, Category::Product);
        assert_eq!(fields.priority, Priority::Low);
    }

    #[test]
    fn empty_title_names_title() {
        let mut draft = draft();
        draft.title = Some(String::new());
        let err = validate_draft(&draft).expect_err("empty title rejected");
        assert_eq!(err.field, "title");
        assert_eq!(err.problem, FieldProblem::Missing);

    }

    #[test]
    fn whitespace_title_is_kept_as_text() {
        let mut draft = draft();
        draft.title = Some("   ".to_string());
        let fields = validate_draft(&draft).expect("whitespace title accepted");
        assert_eq!(fields.title, "   ");
    }

    #[test]
    fn missing_fields_are_reported_in_order() {
        let err = validate_draft(&ComplaintDraft::default()).expect_err("empty draft");
        assert_eq!(err.field, "title");

        let mut draft = draft();
        draft.priority = None;
        assert_eq!(validate_draft(&draft).expect_err("no priority").field, "priority");
    }

    #[test]
    fn length_limits_count_characters() {
        let mut draft = draft();
        draft.title = Some("é".repeat(TITLE_MAX_CHARS));
        assert!(validate_draft(&draft).is_ok());

        draft.title = Some("x".repeat(TITLE_MAX_CHARS + 1));
        let err = validate_draft(&draft).expect_err("title too long");
        assert_eq!(
            err.problem,
            FieldProblem::TooLong {
                max_chars: TITLE_MAX_CHARS
            }
        );

        draft.title = Some("ok".to_string());
        draft.description = Some("y".repeat(DESCRIPTION_MAX_CHARS + 1));
        assert_eq!(
            validate_draft(&draft).expect_err("description too long").field,
            "description"
        );
    }

    #[test]
    fn category_outside_enum_is_rejected() {
        let mut draft = draft();
        draft.category = Some("Billing".to_string());
        let err = validate_draft(&draft).expect_err("unknown category");
        assert_eq!(err.field, "category");
        assert!(err.to_string().contains("Billing"));
    }

    #[test]
    fn status_parsing_rejects_unknown_values() {
        assert_eq!(parse_status(Some("Resolved")), Ok(ComplaintStatus::Resolved));
        let err = parse_status(Some("Archived")).expect_err("unknown status");
        assert_eq!(err.field, "status");
        assert_eq!(
            parse_status(None).expect_err("missing").problem,
            FieldProblem::Missing
        );
    }

    #[test]
    fn filter_treats_empty_values_as_absent() {
        let filter = parse_filter(Some(""), None).expect("empty status ignored");
        assert_eq!(filter, ComplaintFilter::default());

        let filter = parse_filter(Some("Pending"), Some("High")).expect("valid filter");
        assert_eq!(filter.status, Some(ComplaintStatus::Pending));
        assert_eq!(filter.priority, Some(Priority::High));

        assert_eq!(
            parse_filter(None, Some("Urgent")).expect_err("bad priority").field,
            "priority"
        );
    }
}
