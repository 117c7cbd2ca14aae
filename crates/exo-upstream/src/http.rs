//! Classification of raw upstream HTTP responses.
//!
//! Centralizes the status and body checks so the client only deals with
//! request construction.

use crate::{UpstreamReply, error::UpstreamError};

/// Read an upstream response to completion and classify it.
///
/// - **Non-success status** → [`UpstreamReply::Rejected`] with the body verbatim.
/// - **Success with a non-JSON body** → [`UpstreamReply::Malformed`].
/// - **Success with JSON** → [`UpstreamReply::Payload`].
///
/// # Errors
///
/// Returns [`UpstreamError::Http`] if the body cannot be read.
pub async fn read_reply(resp: reqwest::Response) -> Result<UpstreamReply, UpstreamError> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Ok(UpstreamReply::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    Ok(match serde_json::from_str(&body) {
        Ok(payload) => UpstreamReply::Payload(payload),
        Err(_) => UpstreamReply::Malformed { raw: body },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_owned())
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn success_with_json_is_payload() {
        let resp = mock_response(200, r#"{"prediction": [1], "probability": [0.9]}"#);
        let reply = read_reply(resp).await.unwrap();
        assert_eq!(
            reply,
            UpstreamReply::Payload(json!({"prediction": [1], "probability": [0.9]}))
        );
    }

    #[tokio::test]
    async fn success_with_text_is_malformed() {
        let resp = mock_response(200, "<html>gateway warming up</html>");
        let reply = read_reply(resp).await.unwrap();
        assert_eq!(
            reply,
            UpstreamReply::Malformed {
                raw: "<html>gateway warming up</html>".into()
            }
        );
    }

    #[tokio::test]
    async fn success_with_empty_body_is_malformed() {
        let reply = read_reply(mock_response(204, "")).await.unwrap();
        assert_eq!(reply, UpstreamReply::Malformed { raw: String::new() });
    }

    #[tokio::test]
    async fn error_status_is_rejected_verbatim() {
        let resp = mock_response(422, r#"{"detail": "rows must not be empty"}"#);
        let reply = read_reply(resp).await.unwrap();
        assert_eq!(
            reply,
            UpstreamReply::Rejected {
                status: 422,
                body: r#"{"detail": "rows must not be empty"}"#.into()
            }
        );
    }

    #[tokio::test]
    async fn error_status_with_non_json_body_is_still_rejected() {
        let reply = read_reply(mock_response(503, "upstream down")).await.unwrap();
        assert!(matches!(reply, UpstreamReply::Rejected { status: 503, .. }));
    }
}
