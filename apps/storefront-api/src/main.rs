//! Storefront API entry point.

use anyhow::Context;
use pasal_store::Store;
use pasal_storefront_api::{router, AppState, StorefrontConfig};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,pasal_storefront_api=debug,pasal_store=debug,tower_http=info")),
        )
        .with_target(true)
        .init();

    info!("Starting Pasal storefront API...");

    // Load configuration
    let config = StorefrontConfig::load().context("loading configuration")?;
    info!(
        address = %config.bind_address(),
        store = %config.store.name,
        free_shipping_threshold = %config.free_shipping_threshold,
        "Configuration loaded"
    );

    let store = if config.seed_catalog {
        Store::seeded().await.context("seeding demo catalog")?
    } else {
        Store::new()
    };

    let mut app = router(AppState::new(&config, store));
    if config.cors_permissive {
        app = app.layer(CorsLayer::permissive());
    } else {
        warn!("CORS disabled; only same-origin clients can call the API");
    }

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("binding {}", config.bind_address()))?;
    info!(address = %config.bind_address(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
