//! Fail-open gateway in front of the external summary provider.

use crate::task::{
    domain::{SummaryOutcome, TaskSummary, TaskTitle, UnavailableReason},
    ports::{SummaryProvider, SummaryRequest},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, sleep, timeout};
use tracing::{debug, warn};

/// Timeout, retry, and latency limits applied to provider calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayPolicy {
    /// Deadline for a single provider call.
    pub request_timeout: Duration,
    /// Number of attempts, at most two (one retry).
    pub max_attempts: u8,
    /// Pause before the retry.
    pub retry_backoff: Duration,
    /// Ceiling on total time spent in [`SummarizationGateway::summarize`].
    pub max_latency: Duration,
}

impl GatewayPolicy {
    /// Hard cap on attempts regardless of configuration.
    pub const ATTEMPT_LIMIT: u8 = 2;

    /// Returns the attempt count clamped to `1..=ATTEMPT_LIMIT`.
    #[must_use]
    pub const fn effective_attempts(&self) -> u8 {
        if self.max_attempts == 0 {
            1
        } else if self.max_attempts > Self::ATTEMPT_LIMIT {
            Self::ATTEMPT_LIMIT
        } else {
            self.max_attempts
        }
    }

    /// Returns `true` when a retry started after `elapsed` would still
    /// finish inside the latency ceiling.
    #[must_use]
    pub fn retry_fits(&self, elapsed: Duration) -> bool {
        elapsed
            .checked_add(self.retry_backoff)
            .and_then(|total| total.checked_add(self.request_timeout))
            .is_some_and(|total| total <= self.max_latency)
    }
}

impl Default for GatewayPolicy {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            max_attempts: Self::ATTEMPT_LIMIT,
            retry_backoff: Duration::from_millis(250),
            max_latency: Duration::from_secs(10),
        }
    }
}

/// Summarization gateway.
///
/// Wraps a [`SummaryProvider`] so that every failure mode (timeout,
/// transport error, error status, malformed or blank body) collapses into
/// [`SummaryOutcome::Unavailable`]. The gateway never returns an error.
pub struct SummarizationGateway<P>
where
    P: SummaryProvider,
{
    provider: Option<Arc<P>>,
    policy: GatewayPolicy,
}

impl<P> Clone for SummarizationGateway<P>
where
    P: SummaryProvider,
{
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            policy: self.policy,
        }
    }
}

impl<P> SummarizationGateway<P>
where
    P: SummaryProvider,
{
    /// Creates a gateway that calls `provider` under `policy`.
    #[must_use]
    pub const fn new(provider: Arc<P>, policy: GatewayPolicy) -> Self {
        Self {
            provider: Some(provider),
            policy,
        }
    }

    /// Creates a gateway with summarization switched off.
    ///
    /// Every call returns [`UnavailableReason::Disabled`] without contacting
    /// any provider.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            provider: None,
            policy: GatewayPolicy::default(),
        }
    }

    /// Returns the policy in force.
    #[must_use]
    pub const fn policy(&self) -> &GatewayPolicy {
        &self.policy
    }

    /// Returns `true` when a provider is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Requests a summary for the given task text.
    pub async fn summarize(&self, title: &TaskTitle, description: Option<&str>) -> SummaryOutcome {
        let Some(provider) = self.provider.as_deref() else {
            return SummaryOutcome::Unavailable(UnavailableReason::Disabled);
        };

        let request = SummaryRequest::new(title.as_str(), description);
        timeout(self.policy.max_latency, self.attempt(provider, &request))
            .await
            .unwrap_or_else(|_| {
                warn!(
                    max_latency_ms = self.policy.max_latency.as_millis(),
                    "summary provider exceeded latency ceiling"
                );
                SummaryOutcome::Unavailable(UnavailableReason::LatencyCeiling)
            })
    }

    async fn attempt(&self, provider: &P, request: &SummaryRequest) -> SummaryOutcome {
        let started = Instant::now();
        let attempts = self.policy.effective_attempts();
        let mut attempt: u8 = 1;

        loop {
            let (reason, transient) =
                match timeout(self.policy.request_timeout, provider.summarize(request)).await {
                    Ok(Ok(text)) => match TaskSummary::new(text) {
                        Ok(summary) => {
                            debug!(attempt, "summary provider returned a summary");
                            return SummaryOutcome::Generated(summary);
                        }
                        Err(_) => (UnavailableReason::EmptySummary, false),
                    },
                    Ok(Err(err)) => {
                        debug!(attempt, error = %err, "summary provider call failed");
                        (err.unavailable_reason(), err.is_transient())
                    }
                    Err(_) => (UnavailableReason::Timeout, true),
                };

            warn!(attempt, reason = %reason, "summary attempt unavailable");
            if !transient || attempt >= attempts || !self.policy.retry_fits(started.elapsed()) {
                return SummaryOutcome::Unavailable(reason);
            }

            sleep(self.policy.retry_backoff).await;
            attempt = attempt.saturating_add(1);
        }
    }
}
