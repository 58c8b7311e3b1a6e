//! HTTP server: routing, shared state, and serving.
//!
//! The server owns exactly one piece of state: the immutable dataset loaded
//! at startup, shared read-only behind an `Arc`. Handlers never mutate it,
//! so no locking is needed. Each `/api/charts` request is an independent
//! full recomputation; nothing derived is cached between requests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::{DatasetSummary, SalesRecord};
use crate::error::AppError;

pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    /// The full base dataset, loaded once and never mutated.
    pub records: Vec<SalesRecord>,
    /// Distinct products/regions and date span, for control population.
    pub summary: DatasetSummary,
}

/// Build the application router.
///
/// Kept separate from `serve` so tests can exercise routes without binding
/// a socket.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health))
        .route("/api/meta", get(handlers::meta))
        .route("/api/charts", post(handlers::charts))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is terminated.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> Result<(), AppError> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Server(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("Dashboard listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    Ok(())
}
