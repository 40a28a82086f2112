//! Interceptor pipeline contracts.
//!
//! Interceptors run fixed lifecycle callbacks around request handling: a
//! `before` phase ahead of the route service and a `commit` phase after it.
//! A route may attach override configs; the stack matches each config to the
//! interceptor domain that owns it and hands it down, so the dispatch loop
//! itself stays ignorant of any interceptor's semantics.

use std::any::Any;
use std::sync::Arc;

use http::{HeaderMap, Method, StatusCode, Uri};

use crate::error::Result;
use crate::headers::ResponseHeaders;

/// Read-only descriptor of the incoming request.
#[derive(Debug, Clone)]
pub struct RequestHead {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

impl RequestHead {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap) -> Self {
        Self { method, uri, headers }
    }

    /// Request path, for route lookup and logging.
    pub fn path(&self) -> &str {
        self.uri.path()
    }
}

/// The response under construction: status plus claimable headers.
///
/// Built fresh per request. Interceptors and the route service write into it
/// and the transport assembles the final response from [`Self::into_parts`].
#[derive(Debug, Default)]
pub struct PendingResponse {
    pub status: StatusCode,
    pub headers: ResponseHeaders,
}

impl PendingResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_parts(self) -> (StatusCode, HeaderMap) {
        (self.status, self.headers.into_map())
    }
}

/// Outcome of one interceptor phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Headers only; the pipeline keeps going.
    NotWritten,
    /// The response is complete; stop dispatching.
    Written,
}

/// A pipeline-attachable unit running fixed callbacks around request
/// handling.
///
/// Implementations are built once at startup and shared read-only across
/// requests, so they must not carry per-request state.
pub trait Interceptor: Send + Sync + 'static {
    /// Stable short name, used in logs.
    fn name(&self) -> &'static str;

    /// Pre-processing phase, invoked before the route service runs.
    ///
    /// `cfg` is the override config the stack resolved for this interceptor
    /// on the current route, if the route carries one.
    fn before(
        &self,
        rsp: &mut PendingResponse,
        req: &RequestHead,
        cfg: Option<&dyn InterceptorConfig>,
    ) -> Result<Flow>;

    /// Post-processing phase, invoked after the route service on both the
    /// success and the error path.
    fn commit(
        &self,
        rsp: &mut PendingResponse,
        req: &RequestHead,
        cfg: Option<&dyn InterceptorConfig>,
    ) -> Result<Flow>;

    /// Identity hook so override configs can test this interceptor's domain.
    fn as_any(&self) -> &dyn Any;
}

/// A per-route override configuration for one interceptor domain.
pub trait InterceptorConfig: Send + Sync + 'static {
    /// Domain test: true iff this config overrides `interceptor`'s domain,
    /// regardless of either side's contents.
    fn matches(&self, interceptor: &dyn Interceptor) -> bool;

    /// Payload hook so the owning interceptor can read the override back.
    fn as_any(&self) -> &dyn Any;
}

/// Ordered interceptor chain, built once at startup and shared across
/// requests.
#[derive(Default)]
pub struct InterceptorStack {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorStack {
    pub fn new(interceptors: Vec<Arc<dyn Interceptor>>) -> Self {
        Self { interceptors }
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Run every `before` callback in registration order.
    ///
    /// Stops early when an interceptor reports the response written.
    pub fn before(
        &self,
        rsp: &mut PendingResponse,
        req: &RequestHead,
        cfgs: &[Arc<dyn InterceptorConfig>],
    ) -> Result<Flow> {
        for interceptor in &self.interceptors {
            let cfg = resolve_config(interceptor.as_ref(), cfgs);
            if interceptor.before(rsp, req, cfg)? == Flow::Written {
                return Ok(Flow::Written);
            }
        }
        Ok(Flow::NotWritten)
    }

    /// Run every `commit` callback in reverse registration order.
    pub fn commit(
        &self,
        rsp: &mut PendingResponse,
        req: &RequestHead,
        cfgs: &[Arc<dyn InterceptorConfig>],
    ) -> Result<Flow> {
        for interceptor in self.interceptors.iter().rev() {
            let cfg = resolve_config(interceptor.as_ref(), cfgs);
            if interceptor.commit(rsp, req, cfg)? == Flow::Written {
                return Ok(Flow::Written);
            }
        }
        Ok(Flow::NotWritten)
    }
}

/// Pick the route's override for one interceptor. Routes are expected to
/// carry at most one config per domain; the first match wins and no further
/// configs are consulted.
fn resolve_config<'a>(
    interceptor: &dyn Interceptor,
    cfgs: &'a [Arc<dyn InterceptorConfig>],
) -> Option<&'a dyn InterceptorConfig> {
    let cfg = cfgs.iter().find(|cfg| cfg.matches(interceptor))?;
    tracing::debug!(interceptor = interceptor.name(), "route override resolved");
    Some(cfg.as_ref())
}
