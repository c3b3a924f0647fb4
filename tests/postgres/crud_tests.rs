//! Create, read, update, and delete against `PostgreSQL`.

use crate::postgres::helpers::{PreparedRepo, cluster_settings, draft, prepared_repo};
use rstest::rstest;
use taskboard::task::{
    domain::{TaskChanges, TaskId, TaskStatus, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, TaskServiceError, UpdateTaskRequest},
};

#[rstest]
fn create_assigns_id_and_matching_timestamps(prepared_repo: PreparedRepo) {
    let context = prepared_repo;

    let created = context
        .rt
        .block_on(context.repo.create(&draft("Write report", TaskStatus::Pending)))
        .expect("create task");

    assert_eq!(created.id().value(), 1);
    assert_eq!(created.created_at(), created.updated_at());
    let found = context
        .rt
        .block_on(context.repo.find_by_id(created.id()))
        .expect("find task")
        .expect("task exists");
    assert_eq!(found, created);
}

#[rstest]
fn find_missing_task_returns_none(prepared_repo: PreparedRepo) {
    let context = prepared_repo;
    let id = TaskId::new(404).expect("valid id");

    let found = context
        .rt
        .block_on(context.repo.find_by_id(id))
        .expect("lookup should not fail");

    assert!(found.is_none());
}

#[rstest]
fn update_persists_fields_and_advances_updated_at(prepared_repo: PreparedRepo) {
    let context = prepared_repo;
    let created = context
        .rt
        .block_on(context.repo.create(&draft("Draft", TaskStatus::Pending)))
        .expect("create task");

    let mut changed = created.clone();
    changed.apply(TaskChanges {
        title: Some(TaskTitle::new("Final").expect("valid title")),
        status: Some(TaskStatus::Completed),
        ..TaskChanges::default()
    });
    let updated = context
        .rt
        .block_on(context.repo.update(&changed))
        .expect("update task");

    assert_eq!(updated.title().as_str(), "Final");
    assert_eq!(updated.status(), TaskStatus::Completed);
    assert_eq!(updated.created_at(), created.created_at());
    assert!(updated.updated_at() >= created.updated_at());
    let found = context
        .rt
        .block_on(context.repo.find_by_id(created.id()))
        .expect("find task")
        .expect("task exists");
    assert_eq!(found, updated);
}

#[rstest]
fn update_and_delete_of_missing_rows_report_not_found(prepared_repo: PreparedRepo) {
    let context = prepared_repo;
    let created = context
        .rt
        .block_on(context.repo.create(&draft("Gone soon", TaskStatus::Pending)))
        .expect("create task");
    context
        .rt
        .block_on(context.repo.delete(created.id()))
        .expect("delete task");

    let update_result = context.rt.block_on(context.repo.update(&created));
    let delete_result = context.rt.block_on(context.repo.delete(created.id()));

    assert!(matches!(update_result, Err(TaskRepositoryError::NotFound(id)) if id == created.id()));
    assert!(matches!(delete_result, Err(TaskRepositoryError::NotFound(id)) if id == created.id()));
}

#[rstest]
fn corrupt_status_is_reported_as_invalid_persisted_data(prepared_repo: PreparedRepo) {
    let context = prepared_repo;
    context
        .execute_sql("ALTER TABLE tasks DROP CONSTRAINT tasks_status_check")
        .expect("drop status check");
    context
        .execute_sql("INSERT INTO tasks (title, status) VALUES ('legacy', 'archived')")
        .expect("insert legacy row");

    let result = context
        .rt
        .block_on(context.repo.find_by_id(TaskId::new(1).expect("valid id")));

    assert!(matches!(
        result,
        Err(TaskRepositoryError::InvalidPersistedData(_))
    ));
}

#[rstest]
fn service_round_trip_through_postgres(prepared_repo: PreparedRepo) {
    let context = prepared_repo;
    let service = context.service();

    let created = context
        .rt
        .block_on(service.create(
            CreateTaskRequest::new("  Ship release  ").with_description("tag and publish"),
        ))
        .expect("create task");
    assert_eq!(created.title().as_str(), "Ship release");
    assert_eq!(created.status(), TaskStatus::Pending);

    let updated = context
        .rt
        .block_on(service.update(
            created.id(),
            UpdateTaskRequest::new().with_status("in_progress"),
        ))
        .expect("update task");
    assert_eq!(updated.description().as_str(), "tag and publish");
    assert_eq!(updated.status(), TaskStatus::InProgress);

    context
        .rt
        .block_on(service.delete(created.id()))
        .expect("delete task");
    let err = context
        .rt
        .block_on(service.get_by_id(created.id()))
        .expect_err("deleted task should be missing");
    assert!(matches!(err, TaskServiceError::NotFound(id) if id == created.id()));
}

#[rstest]
fn title_of_255_multibyte_characters_is_stored(prepared_repo: PreparedRepo) {
    let context = prepared_repo;
    let title = "é".repeat(255);

    let created = context
        .rt
        .block_on(context.repo.create(&draft(&title, TaskStatus::Closed)))
        .expect("create task");

    assert_eq!(created.title().as_str(), title);
}

#[rstest]
fn settings_connect_with_a_password_holding_url_delimiters(prepared_repo: PreparedRepo) {
    let context = prepared_repo;
    let role = format!("tasks_{}", uuid::Uuid::new_v4().simple());
    context
        .execute_sql(&format!("CREATE ROLE \"{role}\" LOGIN PASSWORD 'p@ss/word'"))
        .expect("create role");

    let mut settings = cluster_settings(context.cluster, context.temp_db.name());
    settings.user.clone_from(&role);
    "p@ss/word".clone_into(&mut settings.password);
    let pool = settings.connect().expect("pool should connect");
    pool.get().expect("connection should be checked out");
    drop(pool);

    context
        .execute_sql(&format!("DROP ROLE \"{role}\""))
        .expect("drop role");
}
