//! Summary values, the summarization trigger, and the fail-open outcome type.

use super::{Task, TaskDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty summary text produced by a summary provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskSummary(String);

impl TaskSummary {
    /// Creates a validated summary, keeping the text exactly as given.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptySummary`] when the text is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let text = value.into();
        if text.trim().is_empty() {
            return Err(TaskDomainError::EmptySummary);
        }
        Ok(Self(text))
    }

    /// Returns the summary as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskSummary {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskSummary> for String {
    fn from(summary: TaskSummary) -> Self {
        summary.0
    }
}

impl fmt::Display for TaskSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a summary was not produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// No summary provider is configured.
    Disabled,
    /// The provider did not answer within the per-attempt timeout.
    Timeout,
    /// The overall latency ceiling expired across attempts.
    LatencyCeiling,
    /// The provider could not be reached.
    Transport,
    /// The provider answered with a non-success status code.
    Status(u16),
    /// The provider's response body could not be decoded.
    MalformedResponse,
    /// The provider returned blank summary text.
    EmptySummary,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("disabled"),
            Self::Timeout => f.write_str("timeout"),
            Self::LatencyCeiling => f.write_str("latency_ceiling"),
            Self::Transport => f.write_str("transport"),
            Self::Status(code) => write!(f, "status_{code}"),
            Self::MalformedResponse => f.write_str("malformed_response"),
            Self::EmptySummary => f.write_str("empty_summary"),
        }
    }
}

/// Result of asking the summarization gateway for a summary.
///
/// Degradation is a value, not an error: callers must handle
/// [`SummaryOutcome::Unavailable`] explicitly and cannot propagate it with
/// `?` by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// The provider produced a summary.
    Generated(TaskSummary),
    /// No summary could be produced.
    Unavailable(UnavailableReason),
}

/// Decision on whether a write must be followed by summary generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryTrigger {
    /// The task is not important or already has a summary.
    NotRequired,
    /// The task became important on this write and has no summary.
    NewlyImportant,
    /// The task was already important but still has no summary.
    MissingSummary,
}

impl SummaryTrigger {
    /// Evaluates the trigger for a write that turned `previous` into
    /// `current`. `previous` is `None` for a freshly created task.
    #[must_use]
    pub fn evaluate(previous: Option<&Task>, current: &Task) -> Self {
        if !current.is_important() || current.summary().is_some() {
            return Self::NotRequired;
        }

        match previous {
            Some(before) if before.is_important() => Self::MissingSummary,
            _ => Self::NewlyImportant,
        }
    }

    /// Returns `true` when summary generation must be attempted.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::NotRequired)
    }

    /// Returns a stable label for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotRequired => "not_required",
            Self::NewlyImportant => "newly_important",
            Self::MissingSummary => "missing_summary",
        }
    }
}
