//! Ask Relay Server
//!
//! HTTP service that forwards questions to a chat-completion inference router
//! and reports latency, token usage and estimated cost

use anyhow::{Context, Result};
use askrelay::config::Settings;
use askrelay::handlers::create_router;
use askrelay::utils::logging::init_logging;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Settings are read once; the handlers only ever see this value
    let settings = Settings::new().context("Failed to load server settings")?;

    init_logging(&settings.logging)?;
    info!("Logging system initialized");
    info!("{}", askrelay::version_info());

    if !settings.has_credential() {
        warn!("No upstream credential configured; /ask will fail until HF_API_KEY is set");
    }
    info!(
        "Upstream: {} (default model: {}, timeout: {}s)",
        settings.upstream.api_url, settings.upstream.default_model, settings.upstream.timeout
    );

    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    let app = create_router(settings).await?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 Ask relay server started!");
    info!("📝 Health check: http://{}/health", addr);
    info!("🔄 Ask endpoint: http://{}/ask", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    Ok(())
}
