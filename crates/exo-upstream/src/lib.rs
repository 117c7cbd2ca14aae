//! # exo-upstream
//!
//! HTTP client for the external exoplanet prediction service.
//!
//! One call per prediction request: canonical rows are POSTed as
//! `{"rows": [...]}` to the model's endpoint path under the configured base
//! URL, authenticated with a static `X-API-Key` header. The model id itself
//! is never sent; routing is expressed only through the path. There are no
//! retries.

mod error;
mod http;

pub use error::UpstreamError;

use exo_config::UpstreamConfig;
use exo_core::{CanonicalRow, ModelDescriptor};
use serde::Serialize;
use std::time::Duration;

/// Header carrying the static upstream credential.
pub const API_KEY_HEADER: &str = "X-API-Key";

// ── Types ──────────────────────────────────────────────────────────

/// Outcome of an upstream call that produced an HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamReply {
    /// 2xx with a JSON body.
    Payload(serde_json::Value),
    /// 2xx whose body is not JSON.
    Malformed { raw: String },
    /// Non-2xx status; status and body are forwarded verbatim.
    Rejected { status: u16, body: String },
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    rows: &'a [CanonicalRow],
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the prediction service.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl UpstreamClient {
    /// Create a client from the upstream configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::NotConfigured`] without a base URL and
    /// [`UpstreamError::Build`] if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        if !config.is_configured() {
            return Err(UpstreamError::NotConfigured);
        }
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("exo-gateway/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| UpstreamError::Build(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.url.trim().trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
        })
    }

    /// Full URL of a model's prediction endpoint.
    #[must_use]
    pub fn endpoint_url(&self, model: &ModelDescriptor) -> String {
        format!("{}{}", self.base_url, model.endpoint)
    }

    /// Submit canonical rows for prediction.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the request cannot be sent or the
    /// response body cannot be read. Non-success statuses are reported as
    /// [`UpstreamReply::Rejected`], not as errors.
    pub async fn predict(
        &self,
        model: &ModelDescriptor,
        rows: &[CanonicalRow],
    ) -> Result<UpstreamReply, UpstreamError> {
        let url = self.endpoint_url(model);
        tracing::debug!(model = %model.id, %url, rows = rows.len(), "calling prediction service");

        let mut request = self.http.post(&url).json(&PredictRequest { rows });
        if !self.api_key.is_empty() {
            request = request.header(API_KEY_HEADER, &self.api_key);
        }

        let reply = http::read_reply(request.send().await?).await?;
        match &reply {
            UpstreamReply::Payload(_) => {
                tracing::debug!(model = %model.id, "prediction service replied");
            }
            UpstreamReply::Malformed { raw } => {
                tracing::warn!(model = %model.id, bytes = raw.len(), "prediction service returned non-JSON body");
            }
            UpstreamReply::Rejected { status, .. } => {
                tracing::warn!(model = %model.id, status, "prediction service rejected request");
            }
        }
        Ok(reply)
    }
}
