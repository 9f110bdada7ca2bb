//! HTTP server for the notification service

use std::future::Future;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use relay_core::config::ServerConfig;
use relay_core::Result;
use relay_dispatch::NotificationProducer;
use relay_store::AuditStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::metrics::{metrics_handler, MetricsRecorder};
use crate::routes;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AuditStore>,
    pub producer: NotificationProducer,
    pub metrics: Arc<MetricsRecorder>,
}

/// Notification service HTTP server
pub struct ApiServer {
    config: ServerConfig,
}

impl ApiServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Serve until `shutdown` resolves.
    pub async fn run<F>(self, state: AppState, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = create_router(state);
        let addr = format!("{}:{}", self.config.bind_address, self.config.port);
        let listener = TcpListener::bind(&addr).await?;

        info!("Notification service listening on http://{}", addr);
        info!("Prometheus metrics at http://{}/metrics", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/metrics", get(metrics_handler))
        .route("/api/notifications/send", post(routes::send_notification))
        .route("/api/notifications/history", get(routes::notification_history))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
