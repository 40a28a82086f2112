//! Shared application state for the coopGate gateway.
//!
//! Startup is the only place policy objects are built: the interceptor
//! stack, the route table, and every override are assembled here once and
//! shared read-only across requests. Anything wrong with the configured
//! policies fails the boot instead of the first request.

use std::sync::Arc;

use coopgate_core::coop::{CoopInterceptor, CoopOverride};
use coopgate_core::error::{CoopGateError, Result};
use coopgate_core::pipeline::{InterceptorConfig, InterceptorStack};
use http::header::HeaderValue;

use crate::config::GatewayConfig;
use crate::dispatch::{RouteEntry, RouteTable};
use crate::obs::metrics::GatewayMetrics;
use crate::services;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    stack: InterceptorStack,
    routes: RouteTable,
    metrics: GatewayMetrics,
}

impl AppState {
    /// Build application state from a validated config.
    ///
    /// Returns `Err` instead of panicking so `main` and tests can surface
    /// boot failures their own way.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let coop = match &cfg.coop {
            Some(section) => CoopInterceptor::new(&section.policies),
            None => CoopInterceptor::same_origin_default(None),
        };
        check_directives("coop", coop.enforced().iter().chain(coop.report_only()))?;

        let routes = RouteTable::new();
        for route in &cfg.routes {
            let service = services::builtin(&route.service).ok_or_else(|| {
                CoopGateError::InvalidConfig(format!(
                    "route {} references unknown service: {}",
                    route.path, route.service
                ))
            })?;

            let mut overrides: Vec<Arc<dyn InterceptorConfig>> = Vec::new();
            if let Some(section) = &route.coop {
                let over = CoopOverride::new(&section.policies);
                check_directives(&route.path, over.enforced().iter().chain(over.report_only()))?;
                overrides.push(Arc::new(over));
            }

            tracing::info!(
                path = %route.path,
                service = %route.service,
                overridden = route.coop.is_some(),
                "route registered"
            );
            routes.insert(route.path.clone(), RouteEntry { service, overrides });
        }

        let stack = InterceptorStack::new(vec![Arc::new(coop)]);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                stack,
                routes,
                metrics: GatewayMetrics::default(),
            }),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn stack(&self) -> &InterceptorStack {
        &self.inner.stack
    }

    pub fn routes(&self) -> &RouteTable {
        &self.inner.routes
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.inner.metrics
    }
}

/// Directive strings become header values verbatim; catch illegal ones at
/// boot instead of on the first request that trips them.
fn check_directives<'a>(scope: &str, directives: impl Iterator<Item = &'a String>) -> Result<()> {
    for directive in directives {
        if HeaderValue::from_str(directive).is_err() {
            return Err(CoopGateError::InvalidConfig(format!(
                "{scope}: policy serializes to an illegal header value: {directive:?}"
            )));
        }
    }
    Ok(())
}
