//! # exo-config
//!
//! Layered configuration loading for the exoplanet prediction gateway using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`EXO_*` prefix, `__` as separator)
//! 2. Flat deployment variables `EXO_API_URL` and `EXO_API_KEY`
//! 3. Project-level `./exo-gateway.toml` (or an explicit path)
//! 4. User-level `~/.config/exo-gateway/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `EXO_UPSTREAM__URL` -> `upstream.url`, `EXO_SERVER__BIND` -> `server.bind`, etc.
//! The `__` (double underscore) separates nested config sections.
//! Text settings (URL, API key, bind address) are taken verbatim, so a
//! numeric-looking key such as `EXO_API_KEY=0012345` keeps its leading zeros.
//!
//! # Usage
//!
//! ```no_run
//! use exo_config::ExoConfig;
//!
//! let config = ExoConfig::load_with_dotenv(None).expect("config");
//! config.validate().expect("valid config");
//! println!("Upstream: {}", config.upstream.url);
//! ```

mod error;
mod server;
mod upstream;

pub use error::ConfigError;
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "exo-gateway.toml";

/// Flat variables understood for compatibility with existing deployments.
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("EXO_API_URL", "upstream.url"),
    ("EXO_API_KEY", "upstream.api_key"),
];

/// Prefixed variables holding text. Figment's `Env` would parse these as
/// numbers or booleans when they look like one.
const TEXT_ENV_KEYS: &[(&str, &str)] = &[
    ("EXO_UPSTREAM__URL", "upstream.url"),
    ("EXO_UPSTREAM__API_KEY", "upstream.api_key"),
    ("EXO_SERVER__BIND", "server.bind"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExoConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl ExoConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// `path` replaces the project-local `exo-gateway.toml` when given.
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if a source cannot be read or a value
    /// has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(path).extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv(path: Option<&Path>) -> Result<Self, ConfigError> {
        // A missing .env is not an error.
        let _ = dotenvy::dotenv();
        Self::load(path)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local or explicit config
        match path {
            Some(explicit) => figment = figment.merge(Toml::file_exact(explicit)),
            None => {
                let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
                if local_path.exists() {
                    figment = figment.merge(Toml::file(local_path));
                }
            }
        }

        // Layer 3: Flat deployment variables
        figment = merge_verbatim(figment, LEGACY_ENV_KEYS);

        // Layer 4: Prefixed environment variables (highest priority)
        let text_keys: Vec<&str> = TEXT_ENV_KEYS.iter().map(|(_, key)| *key).collect();
        figment = figment.merge(Env::prefixed("EXO_").split("__").ignore(&text_keys));
        merge_verbatim(figment, TEXT_ENV_KEYS)
    }

    /// Check that the gateway can start with this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingUpstreamUrl`] without an upstream URL and
    /// [`ConfigError::InvalidValue`] for an unparseable bind address or a
    /// zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.upstream.is_configured() {
            return Err(ConfigError::MissingUpstreamUrl);
        }
        if self.upstream.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "upstream.timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }
        self.bind_addr()?;
        Ok(())
    }

    /// The parsed server bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `server.bind` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|error: std::net::AddrParseError| ConfigError::InvalidValue {
                field: "server.bind",
                reason: error.to_string(),
            })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("exo-gateway").join("config.toml"))
    }
}

/// Merge each set `(variable, key)` pair as an unparsed string.
fn merge_verbatim(figment: Figment, pairs: &[(&str, &str)]) -> Figment {
    pairs.iter().fold(figment, |figment, (var, key)| match Env::var(var) {
        Some(value) => figment.merge(Serialized::default(key, value)),
        None => figment,
    })
}
