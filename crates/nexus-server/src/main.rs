//! Binary entrypoint for the NexusSchedule gateway.
//!
//! Loads `.env` if present, then reads configuration from the environment
//! (see [`nexus_server::config`]).

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use nexus_server::config::GatewayConfig;
use nexus_server::router::build_router;
use nexus_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => return Err(err).context("failed to read .env"),
    }

    let config = GatewayConfig::from_env()?;
    let state = AppState::new(&config).context("failed to initialize application state")?;
    let app = build_router(state, &config);

    let addr = config.bind_addr();
    tracing::info!("nexus gateway starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("nexus gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
