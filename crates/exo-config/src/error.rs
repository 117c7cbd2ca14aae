//! Errors raised while loading or checking gateway settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or a value has the wrong type.
    #[error("failed to load gateway settings: {0}")]
    Load(#[from] figment::Error),

    /// No base URL for the prediction service.
    #[error(
        "prediction service URL is not set; set `upstream.url` in exo-gateway.toml, \
         or EXO_API_URL / EXO_UPSTREAM__URL in the environment"
    )]
    MissingUpstreamUrl,

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_names_every_setting() {
        let message = ConfigError::MissingUpstreamUrl.to_string();
        assert!(message.contains("upstream.url"));
        assert!(message.contains("EXO_API_URL"));
        assert!(message.contains("EXO_UPSTREAM__URL"));
    }

    #[test]
    fn invalid_value_names_field() {
        let error = ConfigError::InvalidValue {
            field: "server.bind",
            reason: "invalid socket address syntax".into(),
        };
        assert_eq!(
            error.to_string(),
            "invalid value for `server.bind`: invalid socket address syntax"
        );
    }
}
