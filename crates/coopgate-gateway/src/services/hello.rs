//! Demo landing page.

use async_trait::async_trait;
use coopgate_core::pipeline::RequestHead;
use coopgate_core::Result;

use crate::dispatch::{Page, PageService};

const PAGE: &str = r##"<!doctype html>
<meta charset="utf-8">
<title>coopGate</title>
<h1>coopGate</h1>
<p>opener: <span id="o">?</span></p>
<p><a href="#" onclick="window.open(location.href); return false">open this page in a popup</a></p>
<script>
  document.getElementById("o").textContent =
    window.opener ? "reachable" : "severed or absent";
</script>
"##;

/// Serves a page that reports whether the window still holds an opener
/// reference, which is exactly the link COOP severs.
pub struct HelloService;

#[async_trait]
impl PageService for HelloService {
    fn name(&self) -> &'static str {
        "hello"
    }

    async fn render(&self, _req: &RequestHead) -> Result<Page> {
        Ok(Page::html(PAGE.to_string()))
    }
}
