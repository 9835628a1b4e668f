//! HTTP surface: JSON routes over the repository and generation services.

pub mod envelope;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::context::ServiceContext;
pub use handlers::AppState;

/// Builds the router with every route and the request-tracing layer.
pub fn router(ctx: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/repos", get(handlers::list_repos))
        .route("/api/repos/{owner}/{repo}/files", get(handlers::list_files))
        .route("/api/generate-summary", post(handlers::generate_summary))
        .route("/api/generate-code", post(handlers::generate_code))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(trace_requests))
        .with_state(ctx)
}

async fn trace_requests(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!(
        "request",
        %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );
    async move {
        let started = Instant::now();
        let response = next.run(request).await;
        info!(
            status = response.status().as_u16(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "request completed"
        );
        response
    }
    .instrument(span)
    .await
}

/// Serves on an already bound listener until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the server fails while running.
pub async fn serve_on(listener: TcpListener, ctx: ServiceContext) -> Result<(), String> {
    let addr = listener.local_addr().map_err(|e| format!("Failed to read local address: {e}"))?;
    info!(
        %addr,
        github = ctx.hosting_configured(),
        ai = ctx.llm_configured(),
        "server listening"
    );
    axum::serve(listener, router(Arc::new(ctx)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {e}"))
}

/// Binds all interfaces on `port` and serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn serve(ctx: ServiceContext, port: u16) -> Result<(), String> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener =
        TcpListener::bind(addr).await.map_err(|e| format!("Failed to bind {addr}: {e}"))?;
    serve_on(listener, ctx).await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
