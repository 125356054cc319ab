//! Asistencia - attendance tracking client
//!
//! Serves the Dashboard, GestionInstancias and DetalleClienteAsistencia
//! views backed by the remote attendance API.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use asistencia::{
    cache, create_router, spawn_cleanup_task, ApiClient, AppState, Config, ExpiringCache,
};

/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the response cache and API client
/// 4. Start the cache sweep task if configured
/// 5. Serve the views until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "asistencia=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting asistencia");

    let config = Config::from_env();
    info!(
        "Configuration loaded: api_base_url={}, default_ttl={}ms, max_entries={}, port={}, cleanup_interval={}s",
        config.api_base_url,
        config.default_ttl_ms,
        config.max_entries,
        config.server_port,
        config.cleanup_interval
    );

    let response_cache = cache::shared(
        ExpiringCache::new()
            .default_ttl(config.default_ttl())
            .max_entries(config.max_entries),
    );
    let client = ApiClient::from_config(&config, response_cache.clone())
        .context("failed to build API client")?;

    let sweeper = (config.cleanup_interval > 0)
        .then(|| spawn_cleanup_task(response_cache, config.cleanup_interval));

    let app = create_router(AppState::new(client));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweeper))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for Ctrl+C or SIGTERM, then stops the sweep task.
async fn shutdown_signal(sweeper: Option<tokio::task::JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = sweeper {
        handle.abort();
        warn!("Cache sweep task aborted");
    }
}
