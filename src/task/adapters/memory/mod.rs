//! In-memory adapters for task management tests.

mod task;

pub use task::InMemoryTaskRepository;
