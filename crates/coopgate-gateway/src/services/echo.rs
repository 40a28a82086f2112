//! Request mirror, handy for checking what the pipeline emits.

use std::fmt::Write;

use async_trait::async_trait;
use coopgate_core::pipeline::RequestHead;
use coopgate_core::Result;

use crate::dispatch::{Page, PageService};

/// Renders the request line and headers back as plain text.
pub struct EchoHeadersService;

#[async_trait]
impl PageService for EchoHeadersService {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn render(&self, req: &RequestHead) -> Result<Page> {
        let mut body = String::new();
        let _ = writeln!(body, "{} {}", req.method, req.uri);
        for (name, value) in &req.headers {
            let _ = writeln!(body, "{name}: {}", String::from_utf8_lossy(value.as_bytes()));
        }
        Ok(Page::text(body))
    }
}
