//! Provider port for external summary generation.

use crate::task::domain::UnavailableReason;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Result type for summary provider calls.
pub type SummaryProviderResult<T> = Result<T, SummaryProviderError>;

/// Input sent to a summary provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRequest {
    /// Task title.
    pub title: String,
    /// Task description, if any.
    pub description: Option<String>,
}

impl SummaryRequest {
    /// Creates a provider request.
    #[must_use]
    pub fn new(title: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            title: title.into(),
            description: description.map(ToOwned::to_owned),
        }
    }
}

/// A single, fallible call to an external summary provider.
///
/// Providers report every failure; they do not time out, retry, or fall
/// back. The summarization gateway layers those policies on top.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Requests a summary for the given task text.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryProviderError`] when the provider cannot be reached,
    /// answers with a non-success status, or sends an undecodable body.
    async fn summarize(&self, request: &SummaryRequest) -> SummaryProviderResult<String>;
}

/// Errors returned by summary provider adapters.
#[derive(Debug, Clone, Error)]
pub enum SummaryProviderError {
    /// The provider could not be reached.
    #[error("summary provider transport failure: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The provider answered with a non-success status code.
    #[error("summary provider returned status {0}")]
    Status(u16),

    /// The response body did not match the expected shape.
    #[error("malformed summary provider response: {0}")]
    MalformedResponse(String),
}

impl SummaryProviderError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns `true` when another attempt could plausibly succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status(code) => *code == 429 || *code >= 500,
            Self::MalformedResponse(_) => false,
        }
    }

    /// Maps the failure onto the reason reported to the orchestrator.
    #[must_use]
    pub const fn unavailable_reason(&self) -> UnavailableReason {
        match self {
            Self::Transport(_) => UnavailableReason::Transport,
            Self::Status(code) => UnavailableReason::Status(*code),
            Self::MalformedResponse(_) => UnavailableReason::MalformedResponse,
        }
    }
}
