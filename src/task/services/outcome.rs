//! Caller-visible rendering of task service results.
//!
//! The transport layer owns the wire format; this module fixes which fault
//! kind, status code, and message each service error maps to.

use super::TaskServiceError;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Message shown to callers in place of internal failure details.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong";

/// Caller-visible category of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// The request carried invalid data.
    InvalidInput,
    /// The referenced task does not exist.
    NotFound,
    /// A domain rule rejected the request.
    BusinessRule,
    /// The failure is on the server side.
    Internal,
}

impl FaultKind {
    /// Returns the HTTP status code conventionally used for this kind.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::InvalidInput | Self::BusinessRule => 400,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }

    /// Returns the short error label shown to callers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InvalidInput => "Validation failed",
            Self::NotFound => "Task not found",
            Self::BusinessRule => "Business logic error",
            Self::Internal => "Internal server error",
        }
    }

    /// Returns `true` when the caller is at fault.
    #[must_use]
    pub const fn is_client_fault(self) -> bool {
        !matches!(self, Self::Internal)
    }
}

/// Error payload rendered to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short label, see [`FaultKind::label`].
    pub error: String,
    /// Detail message. Omitted when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl TaskServiceError {
    /// Classifies the error for transport mapping.
    #[must_use]
    pub const fn fault_kind(&self) -> FaultKind {
        match self {
            Self::Validation(_) => FaultKind::InvalidInput,
            Self::NotFound(_) => FaultKind::NotFound,
            Self::Business(_) => FaultKind::BusinessRule,
            Self::Internal { .. } => FaultKind::Internal,
        }
    }

    /// Renders the caller-visible payload.
    ///
    /// Internal errors are logged here with full detail and replaced by
    /// [`INTERNAL_ERROR_MESSAGE`].
    #[must_use]
    pub fn to_error_body(&self) -> ErrorBody {
        let kind = self.fault_kind();
        let message = match kind {
            FaultKind::Internal => {
                error!(error = %self, "task operation failed");
                INTERNAL_ERROR_MESSAGE.to_owned()
            }
            FaultKind::InvalidInput | FaultKind::NotFound | FaultKind::BusinessRule => {
                self.to_string()
            }
        };
        ErrorBody {
            error: kind.label().to_owned(),
            message,
        }
    }
}

/// Success payload wrapping an operation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskEnvelope<T> {
    /// Confirmation message.
    pub message: &'static str,
    /// Result data. Omitted for operations without a result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> TaskEnvelope<T> {
    /// Wraps the result of a create operation.
    #[must_use]
    pub const fn created(data: T) -> Self {
        Self::with_data("Task created successfully", data)
    }

    /// Wraps the result of a single-task lookup.
    #[must_use]
    pub const fn retrieved(data: T) -> Self {
        Self::with_data("Task retrieved successfully", data)
    }

    /// Wraps the result of a list operation.
    #[must_use]
    pub const fn listed(data: T) -> Self {
        Self::with_data("Tasks retrieved successfully", data)
    }

    /// Wraps the result of an update operation.
    #[must_use]
    pub const fn updated(data: T) -> Self {
        Self::with_data("Task updated successfully", data)
    }

    const fn with_data(message: &'static str, data: T) -> Self {
        Self {
            message,
            data: Some(data),
        }
    }
}

impl TaskEnvelope<()> {
    /// Confirms a delete operation.
    #[must_use]
    pub const fn deleted() -> Self {
        Self {
            message: "Task deleted successfully",
            data: None,
        }
    }
}
