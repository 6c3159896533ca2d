//! HTTP server setup and routing.

pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::IndexingError;
use self::state::AppState;

/// Create the application router with all routes.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/index", post(handlers::index_handler))
        .route("/api/search", get(handlers::search_handler))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}

/// Serve `app` on `addr` until the process is interrupted.
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), IndexingError> {
    info!("Listening on http://{}", addr);
    info!("- Index endpoint: http://{}/api/index", addr);
    info!("- Search endpoint: http://{}/api/search", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| IndexingError::server(format!("Failed to bind {}: {}", addr, e)))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| IndexingError::server(e.to_string()))?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
