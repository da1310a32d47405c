//! Analysis Store server
//!
//! Loads configuration, wires the configured storage backend and layout,
//! and serves the invocation endpoint.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use analysis_store::adapters::http::app_router;
use analysis_store::adapters::storage::{FileObjectStorage, InMemoryObjectStorage, S3ObjectStorage};
use analysis_store::application::handlers::analysis::dispatcher_for;
use analysis_store::config::{AppConfig, ServerConfig, StorageBackend, StorageConfig};
use analysis_store::ports::ObjectStorage;

/// Initialize tracing. `RUST_LOG` wins over the configured level; output
/// is JSON in production.
fn init_tracing(server: &ServerConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| server.log_level.clone().into());

    if server.is_production() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn build_storage(config: &StorageConfig) -> Arc<dyn ObjectStorage> {
    match config.backend {
        StorageBackend::S3 => Arc::new(S3ObjectStorage::from_config(config).await),
        StorageBackend::Filesystem => Arc::new(FileObjectStorage::new(
            config.local_path.as_deref().unwrap_or("."),
            &config.bucket_name,
        )),
        StorageBackend::Memory => Arc::new(InMemoryObjectStorage::new(&config.bucket_name)),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let storage = build_storage(&config.storage).await;
    let dispatcher = dispatcher_for(config.storage.layout, storage);
    let app = app_router(dispatcher, config.server.request_timeout());

    let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
    let addr = listener.local_addr()?;
    info!(
        %addr,
        bucket = %config.storage.bucket_name,
        layout = %config.storage.layout,
        backend = ?config.storage.backend,
        "Analysis store listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
