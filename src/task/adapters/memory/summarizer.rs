//! Scripted in-memory summary provider.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::task::ports::{
    SummaryProvider, SummaryProviderError, SummaryProviderResult, SummaryRequest,
};

/// In-memory summary provider that replays scripted responses.
///
/// Queued responses are returned first, in order; once the queue is empty
/// the fallback response is used. Every request is recorded so tests can
/// assert how often the external dependency was called.
#[derive(Debug, Clone)]
pub struct ScriptedSummaryProvider {
    state: Arc<Mutex<ScriptState>>,
}

#[derive(Debug)]
struct ScriptState {
    queued: VecDeque<SummaryProviderResult<String>>,
    fallback: SummaryProviderResult<String>,
    requests: Vec<SummaryRequest>,
}

impl ScriptedSummaryProvider {
    /// Creates a provider that always answers with `summary`.
    #[must_use]
    pub fn always(summary: impl Into<String>) -> Self {
        Self::with_fallback(Ok(summary.into()))
    }

    /// Creates a provider that always fails with `error`.
    #[must_use]
    pub fn failing(error: SummaryProviderError) -> Self {
        Self::with_fallback(Err(error))
    }

    fn with_fallback(fallback: SummaryProviderResult<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                queued: VecDeque::new(),
                fallback,
                requests: Vec::new(),
            })),
        }
    }

    /// Queues a one-off response ahead of the fallback.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the internal lock is poisoned.
    pub fn push_response(
        &self,
        response: SummaryProviderResult<String>,
    ) -> SummaryProviderResult<()> {
        self.lock()?.queued.push_back(response);
        Ok(())
    }

    /// Returns how many times the provider has been called.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the internal lock is poisoned.
    pub fn call_count(&self) -> SummaryProviderResult<usize> {
        Ok(self.lock()?.requests.len())
    }

    /// Returns every request received so far.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the internal lock is poisoned.
    pub fn requests(&self) -> SummaryProviderResult<Vec<SummaryRequest>> {
        Ok(self.lock()?.requests.clone())
    }

    fn lock(&self) -> SummaryProviderResult<MutexGuard<'_, ScriptState>> {
        self.state
            .lock()
            .map_err(|err| SummaryProviderError::transport(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl SummaryProvider for ScriptedSummaryProvider {
    async fn summarize(&self, request: &SummaryRequest) -> SummaryProviderResult<String> {
        let mut state = self.lock()?;
        state.requests.push(request.clone());
        let queued = state.queued.pop_front();
        queued.unwrap_or_else(|| state.fallback.clone())
    }
}
