//! Inbound HTTP server configuration.

use serde::{Deserialize, Serialize};

fn default_bind() -> String {
    String::from("127.0.0.1:4321")
}

/// Default request body cap (10 MiB).
const fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address the gateway listens on.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Largest accepted request body, CSV uploads included.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}
