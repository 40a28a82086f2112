//! Core pipeline contracts and the COOP policy domain for coopGate.
//!
//! This crate is deliberately free of any network or async dependencies: it
//! defines the claimable response-header mechanism, the interceptor
//! lifecycle every pipeline unit implements, and the COOP interceptor
//! itself. Hosts other than the bundled gateway can embed it as-is.
//!
//! # Hard requirements honored here
//! - no panics in library paths (`unwrap`/`expect`/`panic` denied via lints)
//! - every fallible path surfaces as [`CoopGateError`]
//! - claimed headers are exclusive: double claims fail loudly, never merge

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod coop;
pub mod error;
pub mod headers;
pub mod pipeline;

pub use error::{CoopGateError, Result};
