//! Upstream client error types.

use thiserror::Error;

/// Errors that prevent an upstream reply from being obtained at all.
///
/// Non-success statuses and unparseable bodies are not errors: they are
/// classified as [`crate::UpstreamReply`] variants and forwarded.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP transport error (connection refused, timeout, body read failure).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream base URL is not configured.
    #[error("upstream URL is not configured")]
    NotConfigured,

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(String),
}
