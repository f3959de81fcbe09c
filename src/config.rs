//! Environment-driven service configuration.
//!
//! Configuration is read once at start-up and handed to constructors; no
//! component reads the environment on its own. [`ServiceConfig::from_lookup`]
//! accepts any key lookup so tests can supply values without touching the
//! process environment.

use crate::task::services::GatewayPolicy;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// `PostgreSQL` connection URL.
pub const DATABASE_URL: &str = "DATABASE_URL";
/// Maximum size of the database connection pool.
pub const DATABASE_POOL_SIZE: &str = "DATABASE_POOL_SIZE";
/// Base URL of the summary provider; unset disables summarization.
pub const SUMMARIZER_API_URL: &str = "SUMMARIZER_API_URL";
/// Bearer credential for the summary provider.
pub const SUMMARIZER_API_KEY: &str = "SUMMARIZER_API_KEY";
/// Per-attempt provider timeout in milliseconds.
pub const SUMMARIZER_TIMEOUT_MS: &str = "SUMMARIZER_TIMEOUT_MS";
/// Number of provider attempts (1 or 2).
pub const SUMMARIZER_MAX_ATTEMPTS: &str = "SUMMARIZER_MAX_ATTEMPTS";
/// Pause before the retry in milliseconds.
pub const SUMMARIZER_RETRY_BACKOFF_MS: &str = "SUMMARIZER_RETRY_BACKOFF_MS";
/// Ceiling on total summarization latency in milliseconds.
pub const SUMMARIZER_MAX_LATENCY_MS: &str = "SUMMARIZER_MAX_LATENCY_MS";

const DEFAULT_POOL_SIZE: u32 = 5;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing required configuration variable {0}")]
    Missing(&'static str),

    /// A variable holds a value that cannot be used.
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Offending value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Credential sent to the summary provider.
///
/// The value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a credential.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw credential.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Settings for the external summary provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizerConfig {
    /// Provider base URL.
    pub base_url: String,
    /// Provider credential.
    pub api_key: ApiKey,
    /// Timeout, retry, and latency limits.
    pub policy: GatewayPolicy,
}

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Maximum size of the connection pool.
    pub database_pool_size: u32,
    /// Summary provider settings; `None` disables summarization.
    pub summarizer: Option<SummarizerConfig>,
}

impl ServiceConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let database_url = read(DATABASE_URL).ok_or(ConfigError::Missing(DATABASE_URL))?;
        let database_pool_size = match read(DATABASE_POOL_SIZE) {
            Some(raw) => parse_positive(DATABASE_POOL_SIZE, &raw)?,
            None => DEFAULT_POOL_SIZE,
        };

        let summarizer = match read(SUMMARIZER_API_URL) {
            Some(base_url) => Some(read_summarizer(base_url, &read)?),
            None => None,
        };

        Ok(Self {
            database_url,
            database_pool_size,
            summarizer,
        })
    }
}

fn read_summarizer(
    base_url: String,
    read: &impl Fn(&str) -> Option<String>,
) -> Result<SummarizerConfig, ConfigError> {
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            key: SUMMARIZER_API_URL,
            value: base_url,
            reason: "expected an http:// or https:// URL",
        });
    }

    let api_key = read(SUMMARIZER_API_KEY).ok_or(ConfigError::Missing(SUMMARIZER_API_KEY))?;
    let defaults = GatewayPolicy::default();

    let request_timeout = read_millis(read, SUMMARIZER_TIMEOUT_MS, defaults.request_timeout)?;
    let retry_backoff = read_millis(read, SUMMARIZER_RETRY_BACKOFF_MS, defaults.retry_backoff)?;
    let max_latency = read_millis(read, SUMMARIZER_MAX_LATENCY_MS, defaults.max_latency)?;
    let max_attempts = match read(SUMMARIZER_MAX_ATTEMPTS) {
        Some(raw) => parse_attempts(&raw)?,
        None => defaults.max_attempts,
    };

    if max_latency < request_timeout {
        return Err(ConfigError::Invalid {
            key: SUMMARIZER_MAX_LATENCY_MS,
            value: max_latency.as_millis().to_string(),
            reason: "latency ceiling must not be shorter than the request timeout",
        });
    }

    Ok(SummarizerConfig {
        base_url,
        api_key: ApiKey::new(api_key),
        policy: GatewayPolicy {
            request_timeout,
            max_attempts,
            retry_backoff,
            max_latency,
        },
    })
}

fn read_millis(
    read: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    read(key).map_or(Ok(default), |raw| {
        parse_positive::<u64>(key, &raw).map(Duration::from_millis)
    })
}

fn parse_attempts(raw: &str) -> Result<u8, ConfigError> {
    let attempts: u8 = parse_positive(SUMMARIZER_MAX_ATTEMPTS, raw)?;
    if attempts > GatewayPolicy::ATTEMPT_LIMIT {
        return Err(ConfigError::Invalid {
            key: SUMMARIZER_MAX_ATTEMPTS,
            value: raw.to_owned(),
            reason: "at most one retry is allowed",
        });
    }
    Ok(attempts)
}

fn parse_positive<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
{
    match raw.parse::<T>() {
        Ok(value) if value != T::default() => Ok(value),
        Ok(_) => Err(ConfigError::Invalid {
            key,
            value: raw.to_owned(),
            reason: "must be greater than zero",
        }),
        Err(_) => Err(ConfigError::Invalid {
            key,
            value: raw.to_owned(),
            reason: "expected a non-negative integer",
        }),
    }
}
