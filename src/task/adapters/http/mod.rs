//! HTTP adapters for external services.

mod summarizer;

pub use summarizer::{HttpSummaryProvider, MAX_RESPONSE_BYTES, parse_summary_body};
