//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        NewTask, PersistedTaskData, SortField, SortOrder, Task, TaskDescription, TaskId,
        TaskListQuery, TaskPage, TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;
use mockable::{Clock, DefaultClock};
use tracing::debug;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository<C: Clock + Send + Sync = DefaultClock> {
    pool: TaskPgPool,
    clock: C,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool, using
    /// the system clock for timestamps.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self::with_clock(pool, DefaultClock)
    }
}

impl<C: Clock + Send + Sync> PostgresTaskRepository<C> {
    /// Creates a new repository that timestamps records with `clock`.
    #[must_use]
    pub const fn with_clock(pool: TaskPgPool, clock: C) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl<C: Clock + Send + Sync> TaskRepository for PostgresTaskRepository<C> {
    async fn create(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let timestamp = self.clock.utc();
        let new_row = NewTaskRow {
            title: task.title().as_str().to_owned(),
            description: task.description().as_str().to_owned(),
            status: task.status().as_str().to_owned(),
            created_at: timestamp,
            updated_at: timestamp,
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            debug!(task_id = row.id, "inserted task row");
            row_to_task(row)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, query: &TaskListQuery) -> TaskRepositoryResult<TaskPage> {
        let TaskListQuery { page, status, sort } = *query;
        let limit = i64::from(page.limit());
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        let status_filter = status.map(TaskStatus::as_str);

        self.run_blocking(move |connection| {
            // Count and page read from one snapshot so the total always
            // describes the same filtered set the page was cut from.
            let (row_count, rows) = connection
                .build_transaction()
                .read_only()
                .repeatable_read()
                .run::<_, DieselError, _>(|conn| {
                    let mut count_query = tasks::table.into_boxed();
                    if let Some(value) = status_filter {
                        count_query = count_query.filter(tasks::status.eq(value));
                    }
                    let total = count_query.count().get_result::<i64>(conn)?;

                    let mut page_query = tasks::table.select(TaskRow::as_select()).into_boxed();
                    if let Some(value) = status_filter {
                        page_query = page_query.filter(tasks::status.eq(value));
                    }
                    page_query = match (sort.field, sort.order) {
                        (SortField::Id, SortOrder::Asc) => page_query.order(tasks::id.asc()),
                        (SortField::Id, SortOrder::Desc) => page_query.order(tasks::id.desc()),
                        (SortField::Title, SortOrder::Asc) => {
                            page_query.order((tasks::title.asc(), tasks::id.asc()))
                        }
                        (SortField::Title, SortOrder::Desc) => {
                            page_query.order((tasks::title.desc(), tasks::id.desc()))
                        }
                        (SortField::Status, SortOrder::Asc) => {
                            page_query.order((tasks::status.asc(), tasks::id.asc()))
                        }
                        (SortField::Status, SortOrder::Desc) => {
                            page_query.order((tasks::status.desc(), tasks::id.desc()))
                        }
                        (SortField::CreatedAt, SortOrder::Asc) => {
                            page_query.order((tasks::created_at.asc(), tasks::id.asc()))
                        }
                        (SortField::CreatedAt, SortOrder::Desc) => {
                            page_query.order((tasks::created_at.desc(), tasks::id.desc()))
                        }
                        (SortField::UpdatedAt, SortOrder::Asc) => {
                            page_query.order((tasks::updated_at.asc(), tasks::id.asc()))
                        }
                        (SortField::UpdatedAt, SortOrder::Desc) => {
                            page_query.order((tasks::updated_at.desc(), tasks::id.desc()))
                        }
                    };
                    let rows = page_query
                        .limit(limit)
                        .offset(offset)
                        .load::<TaskRow>(conn)?;
                    Ok((total, rows))
                })
                .map_err(TaskRepositoryError::persistence)?;

            debug!(row_count, returned = rows.len(), "listed task rows");
            let tasks = rows
                .into_iter()
                .map(row_to_task)
                .collect::<TaskRepositoryResult<Vec<_>>>()?;
            let total =
                u64::try_from(row_count).map_err(TaskRepositoryError::invalid_persisted_data)?;
            Ok(TaskPage { tasks, total })
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let task_id = task.id();
        let mut touched = task.clone();
        touched.touch(&self.clock);
        let title = touched.title().as_str().to_owned();
        let description = touched.description().as_str().to_owned();
        let status = touched.status().as_str();
        let updated_at = touched.updated_at();

        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.filter(tasks::id.eq(task_id.value())))
                .set((
                    tasks::title.eq(&title),
                    tasks::description.eq(&description),
                    tasks::status.eq(status),
                    tasks::updated_at.eq(updated_at),
                ))
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;

            row.map(row_to_task)
                .transpose()?
                .ok_or(TaskRepositoryError::NotFound(task_id))
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(tasks::table.filter(tasks::id.eq(id.value())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;

            if deleted_count == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            debug!(task_id = %id, "deleted task row");
            Ok(())
        })
        .await
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::new(id).map_err(TaskRepositoryError::invalid_persisted_data)?,
        title: TaskTitle::new(&title).map_err(TaskRepositoryError::invalid_persisted_data)?,
        description: TaskDescription::new(&description)
            .map_err(TaskRepositoryError::invalid_persisted_data)?,
        status: TaskStatus::try_from(status.as_str())
            .map_err(TaskRepositoryError::invalid_persisted_data)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
