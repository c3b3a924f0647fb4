//! Service layer for task creation, lookup, listing, update, and removal.

use super::{TaskServiceError, TaskServiceResult};
use crate::task::{
    domain::{
        NewTask, PageRequest, PaginationMeta, Task, TaskChanges, TaskDescription, TaskId,
        TaskListQuery, TaskSort, TaskTitle,
        validation::{normalize_sort_order, validate_sort_field, validate_status},
    },
    ports::TaskRepository,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateTaskRequest {
    /// Required title.
    pub title: String,
    /// Optional description; empty when omitted.
    #[serde(default)]
    pub description: String,
    /// Optional status; empty selects `pending`.
    #[serde(default)]
    pub status: String,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

/// Request payload for updating a task.
///
/// Fields that are absent or empty leave the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskRequest {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement status.
    #[serde(default)]
    pub status: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    fn into_changes(self) -> TaskServiceResult<TaskChanges> {
        let supplied = |value: Option<String>| value.filter(|raw| !raw.is_empty());
        let title = supplied(self.title).map(TaskTitle::new).transpose()?;
        let description = supplied(self.description)
            .map(TaskDescription::new)
            .transpose()?;
        let status = match supplied(self.status) {
            Some(raw) => validate_status(&raw)?,
            None => None,
        };
        Ok(TaskChanges {
            title,
            description,
            status,
        })
    }
}

/// Query parameters for listing tasks.
///
/// Out-of-range paging values and unknown sort directions are normalized,
/// never rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListTasksRequest {
    /// 1-based page number.
    pub page: i64,
    /// Page size.
    pub limit: i64,
    /// Status filter; empty lists every status.
    pub status: String,
    /// Sort column; empty sorts by `created_at`.
    pub sort_by: String,
    /// Sort direction, `asc` or `desc`.
    pub sort_order: String,
}

impl ListTasksRequest {
    /// Creates a request using every default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page number.
    #[must_use]
    pub const fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the status filter.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the sort column.
    #[must_use]
    pub fn with_sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self
    }

    /// Sets the sort direction.
    #[must_use]
    pub fn with_sort_order(mut self, sort_order: impl Into<String>) -> Self {
        self.sort_order = sort_order.into();
        self
    }

    fn into_query(self) -> TaskServiceResult<TaskListQuery> {
        let status = validate_status(&self.status)?;
        let field = validate_sort_field(&self.sort_by)?.unwrap_or_default();
        Ok(TaskListQuery {
            page: PageRequest::new(self.page, self.limit),
            status,
            sort: TaskSort::new(field, normalize_sort_order(&self.sort_order)),
        })
    }
}

/// One page of tasks with its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskListPage {
    /// Tasks on the requested page.
    pub tasks: Vec<Task>,
    /// Pagination descriptor for the filtered set.
    pub pagination: PaginationMeta,
}

/// Task management orchestration service.
///
/// Holds no state of its own beyond the repository handle, so one instance
/// can serve concurrent requests. Updates are read-then-write without
/// locking: concurrent writers to the same task race and the last one wins.
pub struct TaskService<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
}

impl<R> Clone for TaskService<R>
where
    R: TaskRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> TaskService<R>
where
    R: TaskRepository,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a task.
    ///
    /// Title and description are trimmed; an empty status becomes
    /// `pending`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when a field is invalid and
    /// [`TaskServiceError::Internal`] when storage fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let title = TaskTitle::new(&request.title)?;
        let description = TaskDescription::new(&request.description)?;
        let status = validate_status(&request.status)?.unwrap_or_default();

        let task = self
            .repository
            .create(&NewTask::new(title, description, status))
            .await
            .map_err(TaskServiceError::storage("create task"))?;
        debug!(task_id = %task.id(), status = %task.status(), "created task");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the given ID
    /// and [`TaskServiceError::Internal`] when storage fails.
    pub async fn get_by_id(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(TaskServiceError::storage("get task"))?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Lists one page of tasks with pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for an unknown status filter
    /// or sort column and [`TaskServiceError::Internal`] when storage fails.
    pub async fn list(&self, request: ListTasksRequest) -> TaskServiceResult<TaskListPage> {
        let query = request.into_query()?;
        let page = self
            .repository
            .list(&query)
            .await
            .map_err(TaskServiceError::storage("get tasks"))?;
        Ok(TaskListPage {
            pagination: PaginationMeta::compute(query.page, page.total),
            tasks: page.tasks,
        })
    }

    /// Overwrites the supplied fields of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the given ID,
    /// [`TaskServiceError::Validation`] when a supplied field is invalid, and
    /// [`TaskServiceError::Internal`] when storage fails.
    pub async fn update(&self, id: TaskId, request: UpdateTaskRequest) -> TaskServiceResult<Task> {
        let mut task = self.find_for_mutation(id).await?;
        let changes = request.into_changes()?;
        if changes.is_empty() {
            debug!(task_id = %id, "update carries no field changes; refreshing updated_at only");
        }
        task.apply(changes);

        let updated = self
            .repository
            .update(&task)
            .await
            .map_err(TaskServiceError::storage("update task"))?;
        debug!(task_id = %id, "updated task");
        Ok(updated)
    }

    /// Permanently removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the given ID
    /// and [`TaskServiceError::Internal`] when storage fails.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<()> {
        self.find_for_mutation(id).await?;
        self.repository
            .delete(id)
            .await
            .map_err(TaskServiceError::storage("delete task"))?;
        debug!(task_id = %id, "deleted task");
        Ok(())
    }

    async fn find_for_mutation(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.get_by_id(id).await.inspect_err(|err| {
            if matches!(err, TaskServiceError::NotFound(_)) {
                warn!(task_id = %id, "mutation targets a missing task");
            }
        })
    }
}
