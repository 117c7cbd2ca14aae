//! Upstream prediction service configuration.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Default, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Base URL of the prediction service, without the `/predict` path.
    #[serde(default, deserialize_with = "string_like")]
    pub url: String,

    /// Static credential sent as `X-API-Key`.
    #[serde(default, deserialize_with = "string_like")]
    pub api_key: String,

    /// Total request timeout in seconds. Unset leaves the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl UpstreamConfig {
    /// The service is reachable only once a base URL is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Accept a scalar of any type as text. A TOML `api_key = 123456` is a
/// credential, not a number.
fn string_like<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(text) => text,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Flag(flag) => flag.to_string(),
    })
}

// The API key must never reach log output.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("url", &self.url)
            .field("api_key", &if self.has_api_key() { "<redacted>" } else { "" })
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = UpstreamConfig::default();
        assert!(!config.is_configured());
        assert!(!config.has_api_key());
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn whitespace_url_is_not_configured() {
        let config = UpstreamConfig {
            url: "   ".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = UpstreamConfig {
            url: "https://exo.example.org".into(),
            api_key: "super-secret".into(),
            timeout_secs: Some(5),
        };
        let rendered = format!("{config:?}");
        assert!(rendered.contains("https://exo.example.org"));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn scalar_credentials_become_text() {
        let config: UpstreamConfig =
            serde_json::from_str(r#"{"url": "http://127.0.0.1:8000", "api_key": 1234567890}"#)
                .unwrap();
        assert_eq!(config.api_key, "1234567890");

        let config: UpstreamConfig = serde_json::from_str(r#"{"api_key": true}"#).unwrap();
        assert_eq!(config.api_key, "true");
        assert_eq!(config.url, "");
    }
}
