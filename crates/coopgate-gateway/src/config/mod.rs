//! Gateway config loader (strict parsing).
//!
//! Unknown fields anywhere in the document are rejected, and the parsed
//! config is validated before it reaches `AppState`.

pub mod schema;

use std::fs;
use std::path::Path;

use coopgate_core::error::{CoopGateError, Result};

pub use schema::{CoopSection, GatewayConfig, GatewaySection, RouteConfig};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| {
        CoopGateError::Internal(format!("read config {}: {e}", path.display()))
    })?;
    load_from_str(&raw)
}

pub fn load_from_str(raw: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(raw)
        .map_err(|e| CoopGateError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
