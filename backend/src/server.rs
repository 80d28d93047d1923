use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, Extension, Router};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{handler::PresignHandler, routes, types::Environment};

/// Upper bound on a local request, above the SDK's 30 s operation timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(35);

/// Routes with the handler, tracing and a timeout answering 408 when exceeded
#[must_use]
pub fn router(presign_handler: Arc<PresignHandler>, request_timeout: Duration) -> Router {
    routes::handler()
        .layer(Extension(presign_handler))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
}

/// Starts the local HTTP server with the given handler
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(presign_handler: Arc<PresignHandler>) -> anyhow::Result<()> {
    let app = router(presign_handler, REQUEST_TIMEOUT);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], Environment::port()?));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Presign backend started on http://{addr}");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutting down");
}
