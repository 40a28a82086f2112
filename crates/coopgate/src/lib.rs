//! Top-level facade crate for coopGate.
//!
//! Re-exports the core pipeline types and the gateway library so users can
//! depend on a single crate.

pub mod core {
    pub use coopgate_core::*;
}

pub mod gateway {
    pub use coopgate_gateway::*;
}
