//! Application services for task management.

mod error;
mod management;
mod outcome;

pub use error::{TaskServiceError, TaskServiceResult};
pub use management::{
    CreateTaskRequest, ListTasksRequest, TaskListPage, TaskService, UpdateTaskRequest,
};
pub use outcome::{ErrorBody, FaultKind, INTERNAL_ERROR_MESSAGE, TaskEnvelope};
