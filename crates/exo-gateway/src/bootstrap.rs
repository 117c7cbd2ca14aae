use anyhow::Context;

use crate::cli::GlobalFlags;

/// Load configuration once at startup: `.env`, TOML layers, then env vars.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<exo_config::ExoConfig> {
    let config = exo_config::ExoConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load configuration")?;
    tracing::debug!(upstream = ?config.upstream, server = ?config.server, "configuration loaded");
    Ok(config)
}
