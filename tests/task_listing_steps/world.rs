//! Shared world state for task listing BDD scenarios.

use std::sync::Arc;

use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    services::{TaskListPage, TaskService, TaskServiceError},
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTaskRepository>;

/// Scenario world for task listing behaviour tests.
pub struct TaskListingWorld {
    pub service: TestTaskService,
    pub last_listing: Option<Result<TaskListPage, TaskServiceError>>,
}

impl TaskListingWorld {
    /// Creates a world backed by an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: TaskService::new(Arc::new(InMemoryTaskRepository::new())),
            last_listing: None,
        }
    }

    /// Returns the successful listing or explains why there is none.
    pub fn listing(&self) -> Result<&TaskListPage, eyre::Report> {
        match self.last_listing.as_ref() {
            Some(Ok(page)) => Ok(page),
            Some(Err(err)) => Err(eyre::eyre!("listing failed: {err}")),
            None => Err(eyre::eyre!("no listing recorded in scenario world")),
        }
    }
}

impl Default for TaskListingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskListingWorld {
    TaskListingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
