//! Minimal counter registry for the gateway.
//!
//! Labels are flattened into sorted key vectors to keep deterministic
//! ordering; values live in `AtomicU64`s behind a `DashMap`.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

/// Escape a label value per the Prometheus text format.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// A counter family with dynamic labels.
#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment the labeled counter by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        let mut key: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        key.sort();
        self.map
            .entry(key)
            .or_default()
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} counter");
        for entry in self.map.iter() {
            let labels = entry
                .key()
                .iter()
                .map(|(k, v)| format!("{k}=\"{}\"", escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            let value = entry.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{name}{{{labels}}} {value}");
        }
    }
}

/// All counter families the gateway maintains.
#[derive(Default)]
pub struct GatewayMetrics {
    /// Every dispatched page request, by path and final status.
    pub http_requests: CounterVec,
    /// Requests that hit a route carrying interceptor overrides.
    pub route_overrides: CounterVec,
    /// Pipeline or service failures, by path.
    pub dispatch_errors: CounterVec,
}

impl GatewayMetrics {
    /// Render every family in Prometheus text format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.http_requests.render("coopgate_http_requests_total", &mut out);
        self.route_overrides.render("coopgate_route_overrides_total", &mut out);
        self.dispatch_errors.render("coopgate_dispatch_errors_total", &mut out);
        out
    }
}
