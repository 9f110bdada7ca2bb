//! Notification service binary
//!
//! Wires the Kafka consumer loop and the HTTP surface together; the
//! two tasks share only the audit store and the metrics recorder.

use std::sync::Arc;

use anyhow::Context;
use relay_api::{ApiServer, AppState, MetricsRecorder};
use relay_core::{RelayConfig, SERVICE_NAME};
use relay_dispatch::{EventConsumer, EventDispatcher, NotificationProducer};
use relay_store::{AuditStore, RedisStore};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = RelayConfig::from_env();
    info!(service = SERVICE_NAME, version = relay_core::VERSION, "Starting notification service");

    // Install the Prometheus recorder before anything counts.
    let metrics = Arc::new(MetricsRecorder::new());

    let store: Arc<dyn AuditStore> = Arc::new(
        RedisStore::connect(&config.redis.url())
            .await
            .context("Failed to connect to Redis")?,
    );

    let producer = NotificationProducer::new(store.clone());
    let dispatcher = Arc::new(EventDispatcher::new(producer.clone(), store.clone()));

    let consumer = EventConsumer::new(&config.kafka).context("Failed to create Kafka consumer")?;
    tokio::spawn(async move {
        if let Err(e) = consumer.run(dispatcher).await {
            error!(error = %e, "Kafka consumer terminated");
        }
    });

    let state = AppState {
        store,
        producer,
        metrics,
    };
    ApiServer::new(config.server).run(state, shutdown_signal()).await?;

    info!("Notification service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
