//! Shared error type across coopGate crates.

use http::header::HeaderName;
use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, CoopGateError>;

/// Unified error type used by the core pipeline and the gateway host.
#[derive(Debug, Error)]
pub enum CoopGateError {
    /// A header name was claimed twice, or written through the plain setter
    /// after an interceptor claimed it.
    #[error("response header already claimed by an interceptor: {0}")]
    HeaderClaimed(HeaderName),

    /// A value destined for the named header is not a legal HTTP field value.
    #[error("invalid value for response header {0}")]
    InvalidHeaderValue(HeaderName),

    /// Configuration failed validation at load time.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Anything the other variants do not cover; never shown to clients.
    #[error("internal error: {0}")]
    Internal(String),
}
