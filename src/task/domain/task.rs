//! Task record aggregate and its creation and patch inputs.

use super::{TaskId, TaskPriority, TaskStatus, TaskSummary, TaskTitle};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task record aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    is_important: bool,
    summary: Option<TaskSummary>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Validated fields for a task that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: TaskTitle,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Initial status.
    pub status: TaskStatus,
    /// Initial priority.
    pub priority: TaskPriority,
    /// Whether the task should carry a generated summary.
    pub is_important: bool,
}

impl NewTask {
    /// Creates task fields with default status, priority, and importance.
    #[must_use]
    pub fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
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
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the initial priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the importance flag.
    #[must_use]
    pub const fn with_importance(mut self, is_important: bool) -> Self {
        self.is_important = is_important;
        self
    }
}

/// Partial update applied to a stored task.
///
/// Only fields that were explicitly set are written; everything else keeps
/// its stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    title: Option<TaskTitle>,
    description: Option<Option<String>>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    is_important: Option<bool>,
    summary: Option<TaskSummary>,
}

impl TaskChanges {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces the description; `None` clears it.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the importance flag.
    #[must_use]
    pub const fn with_importance(mut self, is_important: bool) -> Self {
        self.is_important = Some(is_important);
        self
    }

    /// Attaches a generated summary.
    #[must_use]
    pub fn with_summary(mut self, summary: TaskSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.is_important.is_none()
            && self.summary.is_none()
    }
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted importance flag.
    pub is_important: bool,
    /// Persisted summary, if any.
    pub summary: Option<TaskSummary>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with a fresh identifier and no summary.
    #[must_use]
    pub fn new(fields: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: fields.title,
            description: fields.description,
            status: fields.status,
            priority: fields.priority,
            is_important: fields.is_important,
            summary: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            is_important: data.is_important,
            summary: data.summary,
            created_at: data.created_at,
            updated_at: data.updated_at.max(data.created_at),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns whether the task is marked important.
    #[must_use]
    pub const fn is_important(&self) -> bool {
        self.is_important
    }

    /// Returns the generated summary, if any.
    #[must_use]
    pub const fn summary(&self) -> Option<&TaskSummary> {
        self.summary.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update and refreshes `updated_at` to `at`.
    ///
    /// A summary in `changes` is only attached while the task is important
    /// after the other fields have been applied. Turning importance off keeps
    /// an existing summary.
    pub fn apply_changes(&mut self, changes: &TaskChanges, at: DateTime<Utc>) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(description) = &changes.description {
            self.description.clone_from(description);
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(is_important) = changes.is_important {
            self.is_important = is_important;
        }
        if let Some(summary) = &changes.summary
            && self.is_important
        {
            self.summary = Some(summary.clone());
        }
        self.updated_at = at.max(self.created_at);
    }
}
