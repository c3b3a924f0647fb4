//! In-memory repository for task management tests.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::task::{
    domain::{
        NewTask, SortField, SortOrder, Task, TaskChanges, TaskId, TaskListQuery, TaskPage,
        TaskSort,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers are assigned from a counter starting at 1 and are never
/// reused, even after deletion.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository<C: Clock + Send + Sync = DefaultClock> {
    state: Arc<RwLock<InMemoryTaskState>>,
    clock: C,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty repository using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(DefaultClock)
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock + Send + Sync> InMemoryTaskRepository<C> {
    /// Creates an empty repository that timestamps records with `clock`.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            clock,
        }
    }

    /// Returns the number of stored tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .tasks
            .len()
    }

    /// Returns `true` if no tasks are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_poisoned(err: &impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Orders two tasks for listing.
///
/// Text columns compare by code point, matching the `COLLATE "C"` columns
/// of the `tasks` table, so `Banana` sorts before `apple` in both stores.
fn compare_tasks(left: &Task, right: &Task, sort: TaskSort) -> Ordering {
    let primary = match sort.field {
        SortField::Id => Ordering::Equal,
        SortField::Title => left.title().as_str().cmp(right.title().as_str()),
        SortField::Status => left.status().as_str().cmp(right.status().as_str()),
        SortField::CreatedAt => left.created_at().cmp(&right.created_at()),
        SortField::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
    };
    let ordering = primary.then_with(|| left.id().cmp(&right.id()));
    match sort.order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

#[async_trait]
impl<C: Clock + Send + Sync> TaskRepository for InMemoryTaskRepository<C> {
    async fn create(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| lock_poisoned(&err))?;
        let next_value = state.last_id.checked_add(1).ok_or_else(|| {
            TaskRepositoryError::persistence(std::io::Error::other("task id space exhausted"))
        })?;
        let id = TaskId::new(next_value).map_err(TaskRepositoryError::persistence)?;
        let stored = task.clone().into_task(id, self.clock.utc());
        state.last_id = next_value;
        state.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| lock_poisoned(&err))?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, query: &TaskListQuery) -> TaskRepositoryResult<TaskPage> {
        let state = self.state.read().map_err(|err| lock_poisoned(&err))?;
        let mut matching: Vec<&Task> = state
            .tasks
            .values()
            .filter(|task| query.status.is_none_or(|status| task.status() == status))
            .collect();
        matching.sort_by(|left, right| compare_tasks(left, right, query.sort));

        let total = u64::try_from(matching.len()).map_err(TaskRepositoryError::persistence)?;
        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.page.limit()).unwrap_or(usize::MAX);
        let tasks = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(TaskPage { tasks, total })
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| lock_poisoned(&err))?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;

        stored.apply(TaskChanges {
            title: Some(task.title().clone()),
            description: Some(task.description().clone()),
            status: Some(task.status()),
        });
        stored.touch(&self.clock);
        Ok(stored.clone())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_poisoned(&err))?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }
}
