use std::collections::HashSet;
use std::net::SocketAddr;

use coopgate_core::coop::Policy;
use coopgate_core::error::{CoopGateError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    /// Pipeline-wide COOP policies. Absent means the secure default, a
    /// single enforcing `same-origin`.
    #[serde(default)]
    pub coop: Option<CoopSection>,

    pub routes: Vec<RouteConfig>,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(CoopGateError::InvalidConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.gateway.validate()?;

        if self.routes.is_empty() {
            return Err(CoopGateError::InvalidConfig("routes must not be empty".into()));
        }
        let mut seen = HashSet::new();
        for route in &self.routes {
            if !route.path.starts_with('/') {
                return Err(CoopGateError::InvalidConfig(format!(
                    "route path must start with '/': {}",
                    route.path
                )));
            }
            if !seen.insert(route.path.as_str()) {
                return Err(CoopGateError::InvalidConfig(format!(
                    "duplicate route path: {}",
                    route.path
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|e| {
            CoopGateError::InvalidConfig(format!(
                "gateway.listen is not a socket address: {e}"
            ))
        })?;
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

/// An ordered COOP policy list, for the pipeline default or a route override.
///
/// `policies: []` is meaningful: it suppresses both COOP headers.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoopSection {
    #[serde(default)]
    pub policies: Vec<Policy>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    /// Exact request path, must start with '/' and be unique.
    pub path: String,
    /// Built-in service name; resolved when the app state is built.
    pub service: String,
    /// Per-route COOP override. Presence alone changes behavior: the route
    /// gets exactly these policies instead of the pipeline-wide ones.
    #[serde(default)]
    pub coop: Option<CoopSection>,
}
