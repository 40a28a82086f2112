//! coopGate gateway library entry.
//!
//! This crate wires the HTTP transport, the interceptor pipeline, the route
//! table, and the built-in page services into a deployable gateway. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod obs;
pub mod ops;
pub mod router;
pub mod services;
pub mod transport;
