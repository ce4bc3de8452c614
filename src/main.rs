mod api;
mod config;
mod llm;
mod review;
mod storage;

use crate::api::AppState;
use crate::config::AppConfig;
use crate::llm::OpenAiClient;
use crate::storage::{ReviewStore, SqliteReviewStore};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("🚀 Starting {}", api::SERVICE_NAME);

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Model: {}", config.openai.model);
    info!("   - Database: {}", config.storage.db_path.display());
    info!("   - Server: {}", config.bind_addr());
    match &config.cors.origins {
        Some(origins) => info!("   - CORS origins: {}", origins.join(", ")),
        None => info!("   - CORS origins: *"),
    }

    // Initialize review storage
    info!("💾 Initializing review store...");
    let store = Arc::new(SqliteReviewStore::new(&config.storage.db_path));
    store.initialize().await?;
    info!("✅ Review store ready ({})", store.path().display());

    let completion = Arc::new(OpenAiClient::new(&config.openai));

    // Create application state
    let state = AppState {
        completion,
        store,
        temperature: config.openai.temperature,
    };

    let app = api::router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(api::cors_layer(&config.cors)),
    );

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("📡 Available endpoints:");
    info!("   GET  /          - Service status");
    info!("   POST /review    - Review a code snippet");
    info!("   (also served under /api)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let received = tokio::select! {
        _ = interrupt() => "SIGINT",
        _ = terminate() => "SIGTERM",
    };

    info!(signal = received, "🛑 Shutdown signal received");
}

async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Ctrl+C handler unavailable");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            warn!(error = %e, "SIGTERM handler unavailable");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
