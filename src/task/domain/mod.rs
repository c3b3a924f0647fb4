//! Domain model for task records.
//!
//! Holds the task entity, its validated field types, the closed status
//! enumeration, the list query model, and the pure validation rules. No
//! infrastructure concerns cross this boundary.

mod error;
mod ids;
mod query;
mod status;
mod task;
pub mod validation;
mod values;

pub use error::{BusinessRuleViolation, ParseTaskStatusError, TaskField, ValidationError};
pub use ids::TaskId;
pub use query::{
    PageRequest, PaginationMeta, ParseSortKeyError, SortField, SortOrder, TaskListQuery, TaskPage,
    TaskSort,
};
pub use status::TaskStatus;
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges};
pub use values::{TaskDescription, TaskTitle};
