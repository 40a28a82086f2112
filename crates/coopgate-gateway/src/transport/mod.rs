//! HTTP transport adapter.

pub mod http;
