//! HTTP server
//!
//! Routes carry their view in the file suffix, e.g. `/members/acme.raw.json`.
//! See [`View`] for the suffixes.

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::context::AppContext;
use crate::error::Result;

mod response;
mod routes;
mod view;

pub use view::{View, parse_target};

/// Build the router over a shared context
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/:file", get(routes::time))
        .route("/members/:file", get(routes::members))
        .route("/forks/:file", get(routes::forks))
        .route("/versions/:file", get(routes::versions))
        .route("/assignment/:file", get(routes::assignment))
        .fallback(routes::not_found)
        .with_state(ctx)
}

/// Bind and serve until Ctrl-C
pub async fn serve(ctx: Arc<AppContext>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(&ctx.config.bind).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", err);
    }
}
