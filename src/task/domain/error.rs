//! Validation errors for task records.

use thiserror::Error;

/// Errors returned while constructing or parsing task values.
///
/// Every variant is a field-level validation failure raised before anything
/// reaches the record store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the persisted column width.
    #[error("task title is {actual} characters long, the limit is {max}")]
    TitleTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Length of the rejected title in characters.
        actual: usize,
    },

    /// The status value is not one of the enumerated states.
    #[error("unknown task status '{0}', expected pending, in_progress or completed")]
    InvalidStatus(String),

    /// The priority value is not one of the enumerated levels.
    #[error("unknown task priority '{0}', expected low, medium or high")]
    InvalidPriority(String),

    /// A generated summary was empty after trimming.
    #[error("task summary must not be empty")]
    EmptySummary,

    /// The identifier is not a valid UUID.
    #[error("invalid task identifier '{0}'")]
    InvalidTaskId(String),
}

impl TaskDomainError {
    /// Returns the name of the record field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::InvalidStatus(_) => "status",
            Self::InvalidPriority(_) => "priority",
            Self::EmptySummary => "summary",
            Self::InvalidTaskId(_) => "id",
        }
    }
}
