//! HTTP adapter: axum request in, pipeline-built response out.
//!
//! One catch-all handler funnels every page request through the interceptor
//! stack: `before` phases, then the route service, then `commit` phases. The
//! commit phases also run when the service fails, so policy headers claimed
//! in `before` reach error responses unchanged.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use http::header::CONTENT_TYPE;
use http::{HeaderMap, StatusCode};

use coopgate_core::pipeline::{Flow, PendingResponse, RequestHead};
use coopgate_core::Result;

use crate::app_state::AppState;
use crate::dispatch::RouteEntry;

/// Shared `path` label for requests that miss the route table.
const UNROUTED_LABEL: &str = "unrouted";

pub async fn dispatch(State(state): State<AppState>, req: Request) -> Response {
    let (parts, _body) = req.into_parts();
    let head = RequestHead::new(parts.method, parts.uri, parts.headers);

    // Configured route paths are the only per-path label values; anything
    // else is folded into one series so unrouted probe URLs cannot grow the
    // metrics map without bound.
    let (response, metric_path) = match state.routes().lookup(head.path()) {
        Some(entry) => {
            let rsp = match run(&state, &entry, &head).await {
                Ok(rsp) => rsp,
                Err(e) => {
                    // Only pipeline-assembly bugs land here (double claims
                    // and the like); requests cannot trigger this path.
                    tracing::error!(path = head.path(), error = %e, "dispatch failed");
                    state.metrics().dispatch_errors.inc(&[("path", head.path())]);
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal error\n").into_response()
                }
            };
            (rsp, head.path())
        }
        None => {
            tracing::warn!(path = head.path(), "no route");
            let rsp = (StatusCode::NOT_FOUND, "not found\n").into_response();
            (rsp, UNROUTED_LABEL)
        }
    };

    state
        .metrics()
        .http_requests
        .inc(&[("path", metric_path), ("status", response.status().as_str())]);
    response
}

/// Run the interceptor pipeline around the route's service.
async fn run(state: &AppState, entry: &RouteEntry, head: &RequestHead) -> Result<Response> {
    let mut pending = PendingResponse::new();

    if !entry.overrides.is_empty() {
        state.metrics().route_overrides.inc(&[("path", head.path())]);
    }

    if state.stack().before(&mut pending, head, &entry.overrides)? == Flow::Written {
        let (status, headers) = pending.into_parts();
        return Ok(assemble(status, headers, Body::empty()));
    }

    let page = match entry.service.render(head).await {
        Ok(page) => Some(page),
        Err(e) => {
            tracing::error!(
                path = head.path(),
                service = entry.service.name(),
                error = %e,
                "service render failed"
            );
            state.metrics().dispatch_errors.inc(&[("path", head.path())]);
            pending.status = StatusCode::INTERNAL_SERVER_ERROR;
            None
        }
    };

    if let Some(page) = &page {
        pending.headers.set(CONTENT_TYPE, page.content_type)?;
    }

    // Commit runs on the error path too; claimed policy headers stay put.
    if state.stack().commit(&mut pending, head, &entry.overrides)? == Flow::Written {
        let (status, headers) = pending.into_parts();
        return Ok(assemble(status, headers, Body::empty()));
    }

    let (status, headers) = pending.into_parts();
    let body = match page {
        Some(page) => Body::from(page.body),
        None => Body::from("internal error\n"),
    };
    Ok(assemble(status, headers, body))
}

fn assemble(status: StatusCode, headers: HeaderMap, body: Body) -> Response {
    let mut rsp = Response::new(body);
    *rsp.status_mut() = status;
    *rsp.headers_mut() = headers;
    rsp
}
