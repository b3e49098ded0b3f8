//! Reference REST backend for the page builder
//!
//! Keeps pages, sections and structural components in memory. Used for
//! local runs of the editor and as the far end of client tests.

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ServerError;
pub use handlers::{EnsurePageRequest, PublishResponse};
pub use state::{BackendState, PageState};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the router with all API routes
pub fn create_app(state: BackendState) -> Router {
    Router::new()
        .route(
            "/api/pages/:id/sections",
            get(handlers::get_sections).put(handlers::put_sections),
        )
        .route(
            "/api/companies/:company/pages/ensure",
            post(handlers::ensure_page),
        )
        .route("/api/structural", get(handlers::get_structural))
        .route("/api/structural/publish", post(handlers::publish_structural))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve on an already bound listener until the task is dropped
pub async fn serve(listener: tokio::net::TcpListener, state: BackendState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Pagecraft backend listening on http://{}", addr);
    }
    axum::serve(listener, create_app(state)).await
}
