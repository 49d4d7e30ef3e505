//! # Noticeboard API
//!
//! The HTTP surface: router construction, the request-observation
//! middleware, and the resource handlers. Every route runs inside
//! [`middleware::observe_request`], which owns request ids, failure
//! translation, error logging, and request metrics.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod context;
pub mod extract;
pub mod handlers;
pub mod middleware;

use axum::routing::get;
use axum::Router;

use crate::context::AppContext;

/// Build the application router over a wired context.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::health))
        .route("/api/health/live", get(handlers::health::liveness))
        .route("/api/health/ready", get(handlers::health::readiness))
        .route("/api/metrics", get(handlers::metrics::metrics))
        .route(
            "/api/notices",
            get(handlers::notices::list_notices).post(handlers::notices::create_notice),
        )
        .route(
            "/api/notices/{id}",
            get(handlers::notices::get_notice).delete(handlers::notices::delete_notice),
        )
        // Inner to outer: panics are contained first, then the
        // observation pass translates whatever failure is parked.
        .layer(axum::middleware::from_fn(middleware::catch_panics))
        .layer(axum::middleware::from_fn_with_state(
            ctx.clone(),
            middleware::observe_request,
        ))
        .with_state(ctx)
}
