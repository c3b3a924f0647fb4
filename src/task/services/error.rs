//! Service-level error taxonomy for task operations.

use crate::task::{
    domain::{BusinessRuleViolation, TaskId, ValidationError},
    ports::TaskRepositoryError,
};
use thiserror::Error;

/// Failures returned by [`super::TaskService`].
///
/// The first three variants are domain errors safe to show to callers.
/// [`TaskServiceError::Internal`] wraps storage faults and must not be
/// exposed beyond its kind.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Caller-supplied data violates a field constraint.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The referenced task does not exist.
    #[error("task with id {0} not found")]
    NotFound(TaskId),

    /// A domain rule beyond field validation was violated.
    #[error(transparent)]
    Business(#[from] BusinessRuleViolation),

    /// Storage failed while performing `operation`.
    #[error("failed to {operation}: {source}")]
    Internal {
        /// Short description of the attempted operation.
        operation: &'static str,
        /// Underlying repository failure.
        #[source]
        source: TaskRepositoryError,
    },
}

impl TaskServiceError {
    /// Returns a converter that attaches `operation` context to a repository
    /// failure.
    ///
    /// A repository `NotFound` becomes [`TaskServiceError::NotFound`]; every
    /// other failure becomes [`TaskServiceError::Internal`].
    pub fn storage(operation: &'static str) -> impl FnOnce(TaskRepositoryError) -> Self {
        move |source| match source {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Internal {
                operation,
                source: other,
            },
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
