//! Axum router wiring.
//!
//! Ops endpoints are routed directly; everything else funnels into the
//! catch-all dispatch handler so the interceptor pipeline sees every page
//! request.

use axum::routing::{any, get};
use axum::Router;

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .route("/", any(transport::http::dispatch))
        .route("/*path", any(transport::http::dispatch))
        .with_state(state)
}
