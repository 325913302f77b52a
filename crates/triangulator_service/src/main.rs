use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};
use triangulator_service::config::Config;
use triangulator_service::metrics::Metrics;
use triangulator_service::routes::{self, AppState};
use triangulator_service::store::{InMemoryStore, PointSetStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::parse();
    tracing::info!(config = ?config, "Loaded configuration");

    let metrics = Arc::new(Metrics::new().context("Failed to create metrics registry")?);
    let store: Arc<dyn PointSetStore> = Arc::new(InMemoryStore::new());

    let app = routes::router(AppState {
        store,
        metrics: metrics.clone(),
        max_payload_bytes: config.max_payload_bytes,
        request_timeout: config.request_timeout(),
    });

    // Spawn the metrics server
    let metrics_handle = {
        let router = metrics.router();
        let addr = config.metrics_listen_addr;
        tokio::spawn(async move {
            let listener = TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind metrics listener on {addr}"))?;
            tracing::info!(addr = %addr, "Metrics server started");
            axum::serve(listener, router.into_make_service()).await?;
            Ok::<(), anyhow::Error>(())
        })
    };

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind API listener on {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "Triangulation service listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    metrics_handle.abort();
    match metrics_handle.await {
        Ok(Err(e)) => tracing::error!(error = %e, "Metrics server task failed."),
        Err(e) if e.is_panic() => tracing::error!(error = %e, "Metrics server task panicked."),
        _ => {}
    }

    tracing::info!("Triangulation service shut down gracefully.");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received.");
}
