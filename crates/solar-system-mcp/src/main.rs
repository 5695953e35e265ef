use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use solar_system_lib::{PlanetCatalog, WidgetProvider};
use solar_system_mcp::config::ServerConfig;
use solar_system_mcp::logging::{init_logging, LoggingConfig};
use solar_system_mcp::{router, Dispatcher, McpServerState};

#[tokio::main]
async fn main() -> Result<()> {
    let logging = LoggingConfig::from_env().with_default_service("solar-system");
    init_logging(&logging).context("failed to initialize logging")?;

    let config = ServerConfig::parse();
    let addr = config.listen_addr()?;

    let provider = WidgetProvider::new(&config.assets_dir);
    let widget = provider.load().with_context(|| {
        format!(
            "failed to load widget markup from {}; build the assets before starting the server",
            provider.assets_dir().display()
        )
    })?;
    info!(
        widget = %widget.identifier,
        uri = %widget.template_uri,
        bytes = widget.html.len(),
        "widget markup loaded"
    );

    let gate = config
        .auth
        .build_gate()
        .context("invalid authorization settings")?;
    info!(auth_enabled = gate.is_enabled(), "authorization configured");

    let dispatcher = Dispatcher::new(
        Arc::new(PlanetCatalog::solar_system()),
        Arc::new(widget),
        gate,
    );
    let app = router(McpServerState::new(dispatcher));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received shutdown signal"),
        Err(e) => {
            warn!(error = %e, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
