//! Store, read, update, and delete round trips against `PostgreSQL`.

use super::helpers::{DatabaseContext, database};
use crate::test_helpers::SteppingClock;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use eyre::{WrapErr, ensure};
use mockable::Clock;
use rstest::rstest;
use task_summarizer::task::{
    domain::{
        NewTask, Task, TaskChanges, TaskId, TaskPriority, TaskStatus, TaskSummary, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskUpdate},
};

fn important_task(clock: &SteppingClock) -> Result<Task, eyre::Report> {
    let fields = NewTask::new(TaskTitle::new("Write report")?)
        .with_description("Quarterly numbers")
        .with_priority(TaskPriority::High)
        .with_importance(true);
    Ok(Task::new(fields, clock))
}

#[rstest]
fn stored_task_round_trips(database: DatabaseContext) -> Result<(), eyre::Report> {
    let repo = &database.repository;
    let clock = SteppingClock::default();
    let task = important_task(&clock)?;

    database.rt.block_on(repo.store(&task)).wrap_err("store task")?;
    let found = database
        .rt
        .block_on(repo.find_by_id(task.id()))
        .wrap_err("find task")?;

    ensure!(found.as_ref() == Some(&task), "round trip mismatch: {found:?}");
    Ok(())
}

#[rstest]
fn duplicate_identifier_is_rejected(database: DatabaseContext) -> Result<(), eyre::Report> {
    let repo = &database.repository;
    let task = important_task(&SteppingClock::default())?;
    database.rt.block_on(repo.store(&task)).wrap_err("store task")?;

    let result = database.rt.block_on(repo.store(&task));

    ensure!(
        matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()),
        "unexpected result {result:?}"
    );
    Ok(())
}

#[rstest]
fn update_persists_changes_and_summary(database: DatabaseContext) -> Result<(), eyre::Report> {
    let repo = &database.repository;
    let clock = SteppingClock::default();
    let task = important_task(&clock)?;
    database.rt.block_on(repo.store(&task)).wrap_err("store task")?;

    let changes = TaskChanges::new()
        .with_status(TaskStatus::Completed)
        .with_description(None)
        .with_summary(TaskSummary::new(" Compile the report\n")?);
    let TaskUpdate {
        previous,
        current: updated,
    } = database
        .rt
        .block_on(repo.update(task.id(), &changes, clock.utc()))
        .wrap_err("update task")?;
    let found = database
        .rt
        .block_on(repo.find_by_id(task.id()))
        .wrap_err("find task")?;

    ensure!(previous == task, "previous view should be the stored row");
    ensure!(updated.status() == TaskStatus::Completed, "status not applied");
    ensure!(updated.description().is_none(), "description not cleared");
    ensure!(
        updated.summary().map(TaskSummary::as_str) == Some(" Compile the report\n"),
        "summary not stored verbatim"
    );
    ensure!(updated.updated_at() > task.updated_at(), "updated_at not advanced");
    ensure!(found == Some(updated), "stored row differs from returned task");
    Ok(())
}

#[rstest]
fn missing_rows_are_not_found(database: DatabaseContext) -> Result<(), eyre::Report> {
    let repo = &database.repository;
    let id = TaskId::new();

    let update = database.rt.block_on(repo.update(
        id,
        &TaskChanges::new().with_importance(true),
        SteppingClock::default().utc(),
    ));
    let delete = database.rt.block_on(repo.delete(id));

    ensure!(
        matches!(update, Err(TaskRepositoryError::NotFound(_))),
        "update: {update:?}"
    );
    ensure!(
        matches!(delete, Err(TaskRepositoryError::NotFound(_))),
        "delete: {delete:?}"
    );
    ensure!(
        database
            .rt
            .block_on(repo.find_by_id(id))
            .wrap_err("find task")?
            .is_none(),
        "nothing should have been written"
    );
    Ok(())
}

#[rstest]
fn delete_removes_row(database: DatabaseContext) -> Result<(), eyre::Report> {
    let repo = &database.repository;
    let task = important_task(&SteppingClock::default())?;
    database.rt.block_on(repo.store(&task)).wrap_err("store task")?;

    database
        .rt
        .block_on(repo.delete(task.id()))
        .wrap_err("delete task")?;

    ensure!(
        database
            .rt
            .block_on(repo.find_by_id(task.id()))
            .wrap_err("find task")?
            .is_none(),
        "row should be gone"
    );
    Ok(())
}

#[rstest]
fn schema_application_is_idempotent(database: DatabaseContext) -> Result<(), eyre::Report> {
    database
        .rt
        .block_on(database.repository.apply_schema())
        .wrap_err("reapply schema")?;
    Ok(())
}

#[rstest]
fn corrupt_row_is_a_persistence_error(database: DatabaseContext) -> Result<(), eyre::Report> {
    let repo = &database.repository;
    let task = important_task(&SteppingClock::default())?;
    database.rt.block_on(repo.store(&task)).wrap_err("store task")?;
    let url = database.url().to_owned();
    let mut conn = PgConnection::establish(&url).wrap_err("connect")?;
    conn.batch_execute(
        "ALTER TABLE tasks DROP CONSTRAINT IF EXISTS tasks_priority_check; \
         UPDATE tasks SET priority = 'urgent';",
    )
    .wrap_err("corrupt row")?;

    let found = database.rt.block_on(repo.find_by_id(task.id()));

    ensure!(
        matches!(found, Err(TaskRepositoryError::Persistence(_))),
        "unexpected result {found:?}"
    );
    Ok(())
}
