//! In-memory integration tests for task lifecycle operations.

use std::sync::Arc;

use crate::test_helpers::{InMemoryService, in_memory_service};
use eyre::{WrapErr, ensure};
use rstest::{fixture, rstest};
use task_summarizer::task::{
    adapters::memory::ScriptedSummaryProvider,
    domain::{TaskPriority, TaskStatus},
    services::{CreateTaskRequest, TaskLifecycleError, UpdateTaskRequest},
};

#[fixture]
fn service() -> InMemoryService {
    let provider = Arc::new(ScriptedSummaryProvider::always("Short report summary"));
    in_memory_service(provider).0
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_uses_defaults(service: InMemoryService) -> Result<(), eyre::Report> {
    let created = service
        .create_task(CreateTaskRequest::new("Water plants"))
        .await
        .wrap_err("create task")?;

    ensure!(created.task.status() == TaskStatus::Pending, "status default");
    ensure!(created.task.priority() == TaskPriority::Medium, "priority default");
    ensure!(!created.task.is_important(), "importance default");
    ensure!(created.task.description().is_none(), "description default");
    ensure!(
        created.task.created_at() == created.task.updated_at(),
        "fresh task should have equal timestamps"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn partial_update_changes_only_named_fields(
    service: InMemoryService,
) -> Result<(), eyre::Report> {
    let created = service
        .create_task(
            CreateTaskRequest::new("Write report")
                .with_description("Quarterly numbers")
                .with_priority("low"),
        )
        .await
        .wrap_err("create task")?;

    let updated = service
        .update_task(UpdateTaskRequest::new(created.task.id()).with_priority("high"))
        .await
        .wrap_err("update task")?;

    ensure!(updated.task.priority() == TaskPriority::High, "priority changed");
    ensure!(
        updated.task.title() == created.task.title(),
        "title should be untouched"
    );
    ensure!(
        updated.task.description() == Some("Quarterly numbers"),
        "description should be untouched"
    );
    ensure!(
        updated.task.updated_at() > created.task.updated_at(),
        "updated_at should advance"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn any_status_transition_is_accepted(service: InMemoryService) -> Result<(), eyre::Report> {
    let created = service
        .create_task(CreateTaskRequest::new("Write report").with_status("completed"))
        .await
        .wrap_err("create task")?;

    let reopened = service
        .update_task(UpdateTaskRequest::new(created.task.id()).with_status("pending"))
        .await
        .wrap_err("reopen task")?;

    ensure!(
        reopened.task.status() == TaskStatus::Pending,
        "completed task should be reopenable"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_is_gone_for_every_operation(
    service: InMemoryService,
) -> Result<(), eyre::Report> {
    let created = service
        .create_task(CreateTaskRequest::new("Write report"))
        .await
        .wrap_err("create task")?;
    let id = created.task.id();

    let deleted = service.delete_task(id).await.wrap_err("delete task")?;
    ensure!(deleted == id, "delete should echo the identifier");

    let read = service.get_task(id).await;
    let update = service
        .update_task(UpdateTaskRequest::new(id).with_status("completed"))
        .await;
    let delete_again = service.delete_task(id).await;

    ensure!(
        matches!(read, Err(TaskLifecycleError::NotFound(_))),
        "read after delete: {read:?}"
    );
    ensure!(
        matches!(update, Err(TaskLifecycleError::NotFound(_))),
        "update after delete: {update:?}"
    );
    ensure!(
        matches!(delete_again, Err(TaskLifecycleError::NotFound(_))),
        "second delete: {delete_again:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overlong_title_is_rejected(service: InMemoryService) -> Result<(), eyre::Report> {
    let result = service
        .create_task(CreateTaskRequest::new("x".repeat(256)))
        .await;

    let Err(err) = result else {
        return Err(eyre::eyre!("256 character title should be rejected"));
    };
    ensure!(err.http_status() == 422, "unexpected status for {err}");
    ensure!(
        err.to_string().starts_with("invalid title"),
        "error should name the field: {err}"
    );
    Ok(())
}
