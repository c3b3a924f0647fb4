//! Given steps for task listing BDD scenarios.

use super::world::{TaskListingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::task::services::CreateTaskRequest;

#[given(r#"a task "{title}" with status "{status}""#)]
fn a_task_with_status(
    world: &mut TaskListingWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    run_async(
        world
            .service
            .create(CreateTaskRequest::new(title).with_status(status)),
    )
    .wrap_err("create task for listing scenario")?;
    Ok(())
}

#[given(r#"{count:u32} tasks with status "{status}""#)]
fn many_tasks_with_status(
    world: &mut TaskListingWorld,
    count: u32,
    status: String,
) -> Result<(), eyre::Report> {
    for n in 1..=count {
        run_async(world.service.create(
            CreateTaskRequest::new(format!("task {n:03}")).with_status(status.as_str()),
        ))
        .wrap_err_with(|| format!("create task {n} for listing scenario"))?;
    }
    Ok(())
}
