mod health;
mod presign;

use axum::{
    routing::{get, post},
    Router,
};

/// Creates the router for the local presign server
pub fn handler() -> Router {
    Router::new()
        .route("/", post(presign::handler))
        .route("/health", get(health::handler))
}
