use anyhow::Context;
use exo_upstream::UpstreamClient;

use crate::bootstrap;
use crate::cli::{GlobalFlags, ServeArgs};
use crate::server::{self, AppState};

/// Handle `exo-gateway serve`.
pub async fn handle(args: &ServeArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut config = bootstrap::load_config(flags)?;
    if let Some(bind) = &args.bind {
        config.server.bind.clone_from(bind);
    }
    config.validate().context("invalid configuration")?;
    let addr = config.bind_addr().context("invalid listen address")?;

    if !config.upstream.has_api_key() {
        tracing::warn!("no upstream API key configured; requests are sent without X-API-Key");
    }

    let upstream =
        UpstreamClient::new(&config.upstream).context("failed to build upstream client")?;
    tracing::info!(upstream = %config.upstream.url, "prediction service configured");

    let app = server::create_router(AppState::new(upstream), config.server.max_body_bytes);
    server::serve(addr, app).await
}
