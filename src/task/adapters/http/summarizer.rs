//! HTTP adapter for the external summary provider.

use crate::task::ports::{
    SummaryProvider, SummaryProviderError, SummaryProviderResult, SummaryRequest,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

/// Path appended to the configured base URL.
const SUMMARIES_PATH: &str = "summaries";

/// Largest provider response body read before giving up.
pub const MAX_RESPONSE_BYTES: usize = 64 * 1024;

/// Summary provider reached over HTTP.
///
/// Sends `POST {base_url}/summaries` with a JSON `{title, description}` body
/// and bearer authentication, and expects `{"summary": "..."}` back.
#[derive(Clone)]
pub struct HttpSummaryProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    max_body_bytes: usize,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    summary: String,
}

impl HttpSummaryProvider {
    /// Creates a provider with a default HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryProviderError::Transport`] when the HTTP client
    /// cannot be constructed.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> SummaryProviderResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("task-summarizer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SummaryProviderError::transport)?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Creates a provider around an existing HTTP client.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: format!("{}/{SUMMARIES_PATH}", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            max_body_bytes: MAX_RESPONSE_BYTES,
        }
    }

    /// Overrides the response body size limit.
    #[must_use]
    pub const fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Returns the URL requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl fmt::Debug for HttpSummaryProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSummaryProvider")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("max_body_bytes", &self.max_body_bytes)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SummaryProvider for HttpSummaryProvider {
    async fn summarize(&self, request: &SummaryRequest) -> SummaryProviderResult<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(SummaryProviderError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SummaryProviderError::Status(status.as_u16()));
        }

        let body = read_limited_body(response, self.max_body_bytes).await?;
        parse_summary_body(&body)
    }
}

async fn read_limited_body(
    mut response: reqwest::Response,
    limit: usize,
) -> SummaryProviderResult<Vec<u8>> {
    let declared = response
        .content_length()
        .and_then(|len| usize::try_from(len).ok());
    if declared.is_some_and(|len| len > limit) {
        return Err(oversized_body(limit));
    }

    let mut body = Vec::with_capacity(declared.unwrap_or(0));
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(SummaryProviderError::transport)?
    {
        if body.len() + chunk.len() > limit {
            return Err(oversized_body(limit));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn oversized_body(limit: usize) -> SummaryProviderError {
    SummaryProviderError::MalformedResponse(format!("response body exceeds {limit} bytes"))
}

/// Decodes a provider response body into its summary text.
///
/// # Errors
///
/// Returns [`SummaryProviderError::MalformedResponse`] when the body is not
/// a JSON object with a string `summary` field.
pub fn parse_summary_body(body: &[u8]) -> SummaryProviderResult<String> {
    serde_json::from_slice::<SummaryResponse>(body)
        .map(|decoded| decoded.summary)
        .map_err(|err| SummaryProviderError::MalformedResponse(err.to_string()))
}
