//! Route table and page-service contracts.
//!
//! A route entry pairs the service that renders the page with the interceptor
//! override configs the route carries. The table is populated once while the
//! app state is built and is read-only afterwards.

use std::sync::Arc;

use async_trait::async_trait;
use coopgate_core::pipeline::{InterceptorConfig, RequestHead};
use coopgate_core::Result;
use dashmap::DashMap;

/// A rendered page body plus its content type.
#[derive(Debug, Clone)]
pub struct Page {
    pub content_type: &'static str,
    pub body: String,
}

impl Page {
    pub fn html(body: String) -> Self {
        Self { content_type: "text/html; charset=utf-8", body }
    }

    pub fn text(body: String) -> Self {
        Self { content_type: "text/plain; charset=utf-8", body }
    }
}

/// A unit of request handling selected by exact path.
#[async_trait]
pub trait PageService: Send + Sync + 'static {
    /// Stable service name used in configs and logs.
    fn name(&self) -> &'static str;

    /// Produce the page for `req`.
    ///
    /// Policy headers are not this layer's business: the pipeline has already
    /// claimed the names it owns, and a plain `set` against them would fail.
    async fn render(&self, req: &RequestHead) -> Result<Page>;
}

/// One configured route.
pub struct RouteEntry {
    pub service: Arc<dyn PageService>,
    pub overrides: Vec<Arc<dyn InterceptorConfig>>,
}

/// Exact-path route registry.
#[derive(Default)]
pub struct RouteTable {
    routes: DashMap<String, Arc<RouteEntry>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: String, entry: RouteEntry) {
        self.routes.insert(path, Arc::new(entry));
    }

    pub fn lookup(&self, path: &str) -> Option<Arc<RouteEntry>> {
        self.routes.get(path).map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
