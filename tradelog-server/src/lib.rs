//! TradeLog Server — serves the dashboard and the converted documents.
//!
//! Routes:
//! - `GET /api/coins` — coins with a `*-trades.json` document in the data dir
//! - `GET /health` — liveness probe
//! - everything else — static files, `/` resolving to `index.html`

pub mod config;
pub mod error;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::ApiError;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct CoinList {
    pub coins: Vec<String>,
}

/// Build the application router.
pub fn router(config: &ServerConfig) -> Router {
    let state = Arc::new(AppState {
        data_dir: config.data_dir.clone(),
    });

    Router::new()
        .route("/api/coins", get(get_coins))
        .route("/health", get(health))
        .with_state(state)
        .fallback_service(
            ServeDir::new(&config.static_dir).append_index_html_on_directories(true),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind, serve until Ctrl-C, then drain.
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let app = router(&config);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        static_dir = %config.static_dir.display(),
        data_dir = %config.data_dir.display(),
        "listening on http://{}",
        listener.local_addr()?
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// GET /api/coins
async fn get_coins(State(state): State<Arc<AppState>>) -> Result<Json<CoinList>, ApiError> {
    let dir = state.data_dir.clone();
    let coins = tokio::task::spawn_blocking(move || tradelog_runner::list_coins(&dir))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(Json(CoinList { coins }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl-C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received, stopping");
}
