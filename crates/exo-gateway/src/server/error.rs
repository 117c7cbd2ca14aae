//! Error responses of the prediction endpoint.
//!
//! Every failure leaves the gateway as a single JSON body. Upstream
//! rejections are the exception: their status and body are forwarded as-is.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use exo_core::PredictError;
use exo_upstream::UpstreamError;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    /// Local validation failed; the upstream service was not called.
    Validation(PredictError),
    /// The request body could not be read or decoded.
    InvalidBody { status: StatusCode, message: String },
    /// The upstream service answered with a non-success status.
    UpstreamRejected { status: u16, body: String },
    /// The upstream service answered 2xx with a body that is not JSON.
    UpstreamMalformed { raw: String },
    /// No response could be obtained from the upstream service.
    UpstreamUnreachable(UpstreamError),
}

impl From<PredictError> for ApiError {
    fn from(error: PredictError) -> Self {
        Self::Validation(error)
    }
}

impl From<UpstreamError> for ApiError {
    fn from(error: UpstreamError) -> Self {
        Self::UpstreamUnreachable(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(error) => {
                tracing::warn!(%error, "rejecting prediction request");
                error_body(StatusCode::BAD_REQUEST, &error.to_string())
            }
            Self::InvalidBody { status, message } => {
                tracing::warn!(%status, %message, "unreadable request body");
                error_body(status, &message)
            }
            Self::UpstreamRejected { status, body } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
            }
            Self::UpstreamMalformed { raw } => (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": "Bad JSON from model service", "raw": raw})),
            )
                .into_response(),
            Self::UpstreamUnreachable(error) => {
                tracing::error!(%error, "prediction service unreachable");
                error_body(
                    StatusCode::BAD_GATEWAY,
                    &format!("Model service unreachable: {error}"),
                )
            }
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
