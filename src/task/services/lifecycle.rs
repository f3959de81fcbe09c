//! Service layer orchestrating task writes and conditional summarization.

use crate::task::{
    domain::{
        NewTask, SummaryOutcome, SummaryTrigger, Task, TaskChanges, TaskDomainError, TaskId,
        TaskPriority, TaskStatus, TaskSummary, TaskTitle, UnavailableReason,
    },
    ports::{SummaryProvider, TaskRepository, TaskRepositoryError, TaskUpdate},
    services::SummarizationGateway,
};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Request payload for creating a task.
///
/// Status and priority are accepted as raw strings and validated before any
/// persistence takes place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    is_important: bool,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: None,
            priority: None,
            is_important: false,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the initial priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the importance flag.
    #[must_use]
    pub const fn with_importance(mut self, is_important: bool) -> Self {
        self.is_important = is_important;
        self
    }

    fn into_new_task(self) -> Result<NewTask, TaskDomainError> {
        let mut fields = NewTask::new(TaskTitle::new(self.title)?)
            .with_importance(self.is_important);
        if let Some(description) = self.description {
            fields = fields.with_description(description);
        }
        if let Some(status) = self.status {
            fields = fields.with_status(TaskStatus::try_from(status.as_str())?);
        }
        if let Some(priority) = self.priority {
            fields = fields.with_priority(TaskPriority::try_from(priority.as_str())?);
        }
        Ok(fields)
    }
}

/// Request payload for a partial task update.
///
/// Fields left unset keep their stored values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    id: TaskId,
    title: Option<String>,
    description: Option<Option<String>>,
    status: Option<String>,
    priority: Option<String>,
    is_important: Option<bool>,
}

impl UpdateTaskRequest {
    /// Creates an update for the given task that changes nothing yet.
    #[must_use]
    pub const fn new(id: TaskId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            status: None,
            priority: None,
            is_important: None,
        }
    }

    /// Returns the targeted task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Clears the description.
    #[must_use]
    pub fn without_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Replaces the importance flag.
    #[must_use]
    pub const fn with_importance(mut self, is_important: bool) -> Self {
        self.is_important = Some(is_important);
        self
    }

    fn into_changes(self) -> Result<(TaskId, TaskChanges), TaskDomainError> {
        let mut changes = TaskChanges::new();
        if let Some(title) = self.title {
            changes = changes.with_title(TaskTitle::new(title)?);
        }
        if let Some(description) = self.description {
            changes = changes.with_description(description);
        }
        if let Some(status) = self.status {
            changes = changes.with_status(TaskStatus::try_from(status.as_str())?);
        }
        if let Some(priority) = self.priority {
            changes = changes.with_priority(TaskPriority::try_from(priority.as_str())?);
        }
        if let Some(is_important) = self.is_important {
            changes = changes.with_importance(is_important);
        }
        Ok((self.id, changes))
    }
}

/// What happened to the summary during a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarizationStatus {
    /// The task did not need a summary on this write.
    NotRequired,
    /// A summary was generated and stored.
    Generated,
    /// Summary generation was skipped because the provider was unavailable.
    Skipped(UnavailableReason),
    /// A summary was generated, but the task stopped being important before
    /// it could be attached.
    Discarded,
    /// A summary was generated, but the write attaching it failed. The
    /// primary write stands without a summary.
    StoreFailed,
}

impl fmt::Display for SummarizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRequired => f.write_str("not_required"),
            Self::Generated => f.write_str("generated"),
            Self::Skipped(reason) => write!(f, "skipped:{reason}"),
            Self::Discarded => f.write_str("discarded"),
            Self::StoreFailed => f.write_str("store_failed"),
        }
    }
}

/// Record returned by a create or update, with the summarization result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskWriteOutcome {
    /// The task as persisted.
    pub task: Task,
    /// Summary handling for this write.
    pub summarization: SummarizationStatus,
}

impl TaskWriteOutcome {
    const fn new(task: Task, summarization: SummarizationStatus) -> Self {
        Self {
            task,
            summarization,
        }
    }
}

/// Inbound operations exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOperation {
    /// Create a task.
    Create,
    /// Read a task.
    Read,
    /// Partially update a task.
    Update,
    /// Delete a task.
    Delete,
}

impl TaskOperation {
    /// HTTP status a transport layer reports when the operation succeeds.
    #[must_use]
    pub const fn success_status(self) -> u16 {
        match self {
            Self::Create => 201,
            Self::Read | Self::Update | Self::Delete => 200,
        }
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Input failed field validation; nothing was written.
    #[error("invalid {field}: {0}", field = .0.field())]
    Validation(#[from] TaskDomainError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// The record store failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl TaskLifecycleError {
    /// HTTP status a transport layer reports for this failure.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 422,
            Self::NotFound(_) => 404,
            Self::Repository(_) => 500,
        }
    }
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// The only writer of task records. Primary writes always complete before a
/// summary is requested, and provider failures never fail the operation.
#[derive(Clone)]
pub struct TaskLifecycleService<R, P, C>
where
    R: TaskRepository,
    P: SummaryProvider,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    gateway: SummarizationGateway<P>,
    clock: Arc<C>,
}

impl<R, P, C> TaskLifecycleService<R, P, C>
where
    R: TaskRepository,
    P: SummaryProvider,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        gateway: SummarizationGateway<P>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            gateway,
            clock,
        }
    }

    /// Creates a task and, when it is important, attempts to summarize it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] when the input is invalid
    /// and [`TaskLifecycleError::Repository`] when the record cannot be
    /// stored. Summary provider failures, and failures to attach a generated
    /// summary, are reported through [`TaskWriteOutcome::summarization`]
    /// instead.
    #[instrument(skip_all, fields(is_important = request.is_important))]
    pub async fn create_task(
        &self,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<TaskWriteOutcome> {
        let fields = request.into_new_task()?;
        let task = Task::new(fields, &*self.clock);
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), "task created");
        Ok(self.reconcile_summary(None, task).await)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// or [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn get_task(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }

    /// Applies a partial update and summarizes the task when the write leaves
    /// it important without a summary.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for invalid input,
    /// [`TaskLifecycleError::NotFound`] when the task does not exist, and
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    #[instrument(skip_all, fields(task_id = %request.id()))]
    pub async fn update_task(
        &self,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<TaskWriteOutcome> {
        let (id, changes) = request.into_changes()?;
        let TaskUpdate { previous, current } = self
            .repository
            .update(id, &changes, self.clock.utc())
            .await?;
        debug!(task_id = %id, "task updated");
        Ok(self.reconcile_summary(Some(&previous), current).await)
    }

    /// Permanently deletes a task and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// or [`TaskLifecycleError::Repository`] when deletion fails.
    pub async fn delete_task(&self, id: TaskId) -> TaskLifecycleResult<TaskId> {
        self.repository.delete(id).await?;
        info!(task_id = %id, "task deleted");
        Ok(id)
    }

    async fn reconcile_summary(&self, previous: Option<&Task>, task: Task) -> TaskWriteOutcome {
        let trigger = SummaryTrigger::evaluate(previous, &task);
        if !trigger.is_required() {
            return TaskWriteOutcome::new(task, SummarizationStatus::NotRequired);
        }

        debug!(task_id = %task.id(), trigger = trigger.as_str(), "requesting summary");
        match self.gateway.summarize(task.title(), task.description()).await {
            SummaryOutcome::Generated(summary) => self.attach_summary(task, summary).await,
            SummaryOutcome::Unavailable(reason) => {
                warn!(task_id = %task.id(), reason = %reason, "summary generation skipped");
                TaskWriteOutcome::new(task, SummarizationStatus::Skipped(reason))
            }
        }
    }

    async fn attach_summary(&self, task: Task, summary: TaskSummary) -> TaskWriteOutcome {
        let changes = TaskChanges::new().with_summary(summary.clone());
        let written = self
            .repository
            .update(task.id(), &changes, self.clock.utc())
            .await;
        match written {
            Ok(TaskUpdate { current, .. }) if current.summary() == Some(&summary) => {
                TaskWriteOutcome::new(current, SummarizationStatus::Generated)
            }
            Ok(TaskUpdate { current, .. }) => {
                warn!(task_id = %task.id(), "task lost importance before summary was stored");
                TaskWriteOutcome::new(current, SummarizationStatus::Discarded)
            }
            Err(err) => {
                warn!(task_id = %task.id(), error = %err, "summary could not be stored");
                TaskWriteOutcome::new(task, SummarizationStatus::StoreFailed)
            }
        }
    }
}
