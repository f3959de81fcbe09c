//! Logging bootstrap for binaries.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the process entry point. Output goes to stderr so command output on
//! stdout stays machine-readable.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::{Directive, ParseError};

/// Directive applied on top of `RUST_LOG` when the binary starts.
pub const DEFAULT_DIRECTIVE: &str = "task_summarizer=info";

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The default directive could not be parsed.
    #[error("invalid log directive '{directive}': {source}")]
    Directive {
        /// Directive text.
        directive: String,
        /// Parser failure.
        source: ParseError,
    },

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Builds the filter from `RUST_LOG` plus `default_directive`.
///
/// # Errors
///
/// Returns [`TelemetryError::Directive`] when `default_directive` is not a
/// valid filter directive.
pub fn build_filter(default_directive: &str) -> Result<EnvFilter, TelemetryError> {
    let directive: Directive = default_directive
        .parse()
        .map_err(|source| TelemetryError::Directive {
            directive: default_directive.to_owned(),
            source,
        })?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Installs a formatted subscriber writing to stderr.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the directive is invalid or a global
/// subscriber has already been set.
pub fn init_tracing(default_directive: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(default_directive)?)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| TelemetryError::Install(err.to_string()))
}
