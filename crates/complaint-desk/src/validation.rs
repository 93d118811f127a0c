//! Field-level validation shared by complaint intake and account creation.

use std::fmt;

/// Caller-correctable problem with a single named field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} {problem}")]
pub struct ValidationError {
    pub field: &'static str,
    pub problem: FieldProblem,
}

impl ValidationError {
    pub fn new(field: &'static str, problem: FieldProblem) -> Self {
        Self { field, problem }
    }

    pub fn missing(field: &'static str) -> Self {
        Self::new(field, FieldProblem::Missing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    TooShort { min_chars: usize },
    TooLong { max_chars: usize },
    Malformed,
    NotAllowed {
        value: String,
        allowed: &'static [&'static str],
    },
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::Missing => f.write_str("is required"),
            FieldProblem::TooShort { min_chars } => {
                write!(f, "must be at least {min_chars} characters")
            }
            FieldProblem::TooLong { max_chars } => {
                write!(f, "cannot be more than {max_chars} characters")
            }
            FieldProblem::Malformed => f.write_str("is not valid"),
            FieldProblem::NotAllowed { value, allowed } => {
                write!(f, "'{value}' is not one of {}", allowed.join(", "))
            }
        }
    }
}

pub(crate) fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.trim().is_empty())
}

/// Required text of 1 to `max_chars` Unicode scalar values. Only absent or empty input counts
/// as missing; whitespace is content.
pub(crate) fn bounded_text(
    field: &'static str,
    raw: Option<&str>,
    max_chars: usize,
) -> Result<String, ValidationError> {
    let value = raw
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ValidationError::missing(field))?;
    if value.chars().count() > max_chars {
        return Err(ValidationError::new(
            field,
            FieldProblem::TooLong { max_chars },
        ));
    }
    Ok(value.to_string())
}

/// Required value matched case-sensitively against `allowed` through `parse`.
pub(crate) fn enum_value<T>(
    field: &'static str,
    raw: Option<&str>,
    allowed: &'static [&'static str],
    parse: fn(&str) -> Option<T>,
) -> Result<T, ValidationError> {
    let value = non_empty(raw).ok_or_else(|| ValidationError::missing(field))?;
    parse(value).ok_or_else(|| {
        ValidationError::new(
            field,
            FieldProblem::NotAllowed {
                value: value.to_string(),
                allowed,
            },
        )
    })
}
