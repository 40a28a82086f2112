//! Built-in page services.

mod echo;
mod hello;

use std::sync::Arc;

use crate::dispatch::PageService;

pub use echo::EchoHeadersService;
pub use hello::HelloService;

/// Resolve a config-facing service name to its implementation.
pub fn builtin(name: &str) -> Option<Arc<dyn PageService>> {
    match name {
        "hello" => Some(Arc::new(HelloService)),
        "echo" => Some(Arc::new(EchoHeadersService)),
        _ => None,
    }
}
