//! HTTP front end
//!
//! Axum router exposing the analysis page and the `/analyze` endpoint.

pub mod error;
pub mod form;
pub mod routes;

pub use error::ApiError;

use crate::app::App;
use crate::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(app: Arc<App>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/analyze", post(routes::analyze))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

/// Run the web server until ctrl-c.
pub async fn serve(app: Arc<App>, addr: SocketAddr, max_upload_bytes: usize) -> Result<()> {
    let router = create_router(app, max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
