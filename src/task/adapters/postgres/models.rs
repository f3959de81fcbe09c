//! Diesel row models for task persistence.

use super::schema::tasks;
use crate::task::domain::Task;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Task status.
    pub status: String,
    /// Task priority.
    pub priority: String,
    /// Importance flag.
    pub is_important: bool,
    /// Generated summary, if any.
    pub summary: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Task status.
    pub status: String,
    /// Task priority.
    pub priority: String,
    /// Importance flag.
    pub is_important: bool,
    /// Generated summary, if any.
    pub summary: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset writing every mutable column of a task.
///
/// `None` values are written as `NULL` so a cleared description is
/// persisted rather than skipped.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Task status.
    pub status: String,
    /// Task priority.
    pub priority: String,
    /// Importance flag.
    pub is_important: bool,
    /// Generated summary, if any.
    pub summary: Option<String>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for NewTaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(ToOwned::to_owned),
            status: task.status().as_str().to_owned(),
            priority: task.priority().as_str().to_owned(),
            is_important: task.is_important(),
            summary: task.summary().map(|summary| summary.as_str().to_owned()),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

impl From<&Task> for TaskChangeset {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title().as_str().to_owned(),
            description: task.description().map(ToOwned::to_owned),
            status: task.status().as_str().to_owned(),
            priority: task.priority().as_str().to_owned(),
            is_important: task.is_important(),
            summary: task.summary().map(|summary| summary.as_str().to_owned()),
            updated_at: task.updated_at(),
        }
    }
}
