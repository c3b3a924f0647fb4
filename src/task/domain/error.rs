//! Error types for task domain validation and parsing.

use std::fmt;
use thiserror::Error;

/// Caller-facing field names that validation failures are reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    /// Task identifier supplied by the caller.
    Id,
    /// Task title.
    Title,
    /// Task description.
    Description,
    /// Task status, either on a record or as a list filter.
    Status,
    /// Sort column of a list query.
    SortBy,
}

impl TaskField {
    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Description => "description",
            Self::Status => "status",
            Self::SortBy => "sort_by",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied data violates a field constraint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("validation error on field '{field}': {message}")]
pub struct ValidationError {
    field: TaskField,
    message: String,
}

impl ValidationError {
    /// Creates a validation error for `field`.
    #[must_use]
    pub fn new(field: TaskField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Returns the offending field.
    #[must_use]
    pub const fn field(&self) -> TaskField {
        self.field
    }

    /// Returns the human-readable constraint description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A domain rule beyond single-field validation was violated.
///
/// No current operation raises this; the transport mapping still handles it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct BusinessRuleViolation(pub String);

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
