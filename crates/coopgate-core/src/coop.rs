//! Cross-Origin-Opener-Policy interceptor.
//!
//! COOP controls whether a window keeps a script reference to windows it
//! opens (or is opened by), keyed on the origin relationship between the
//! two. The interceptor computes its enforcing and report-only directive
//! lists once at construction and claims both COOP response headers on every
//! request, so route services can neither weaken nor duplicate them.
//!
//! Directive grammar: `<mode>` or `<mode>; report-to "<group>"`.
//! See <https://html.spec.whatwg.org/#cross-origin-opener-policies>.

use std::any::Any;
use std::fmt;
use std::str::FromStr;

use http::header::HeaderName;
use serde::Deserialize;

use crate::error::{CoopGateError, Result};
use crate::pipeline::{Flow, Interceptor, InterceptorConfig, PendingResponse, RequestHead};

/// Enforcing response header.
pub const CROSS_ORIGIN_OPENER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-opener-policy");

/// Report-only variant: violations are reported but not enforced.
pub const CROSS_ORIGIN_OPENER_POLICY_REPORT_ONLY: HeaderName =
    HeaderName::from_static("cross-origin-opener-policy-report-only");

/// A COOP mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Only same-origin openers and openees keep a reference to each other.
    /// The strictest mode, and the recommended one.
    SameOrigin,
    /// Windows on this origin keep references to popups they open; the
    /// opposite direction is severed.
    SameOriginAllowPopups,
    /// No opener isolation. The browser default, kept only for pages that
    /// need legacy window interaction.
    UnsafeNone,
}

impl Mode {
    /// Wire token for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::SameOrigin => "same-origin",
            Mode::SameOriginAllowPopups => "same-origin-allow-popups",
            Mode::UnsafeNone => "unsafe-none",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = CoopGateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "same-origin" => Ok(Mode::SameOrigin),
            "same-origin-allow-popups" => Ok(Mode::SameOriginAllowPopups),
            "unsafe-none" => Ok(Mode::UnsafeNone),
            other => Err(CoopGateError::InvalidConfig(format!(
                "unknown COOP mode: {other:?}"
            ))),
        }
    }
}

/// One desired opener-isolation policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Policy {
    /// Isolation strength.
    pub mode: Mode,
    /// Reporting group violations are sent to. Group wiring is the Reporting
    /// API's concern, outside this crate; an empty string means absent.
    #[serde(default)]
    pub reporting_group: Option<String>,
    /// Report violations without changing browser behavior.
    #[serde(default)]
    pub report_only: bool,
}

impl Policy {
    /// Enforcing policy with no reporting group.
    pub fn new(mode: Mode) -> Self {
        Self { mode, reporting_group: None, report_only: false }
    }

    /// Serialize to the wire directive.
    ///
    /// The reporting group is embedded verbatim inside double quotes. No
    /// escaping is performed, so the caller must supply a group name that is
    /// safe in that position.
    pub fn directive(&self) -> String {
        match self.reporting_group.as_deref() {
            Some(group) if !group.is_empty() => {
                format!("{}; report-to \"{group}\"", self.mode.as_str())
            }
            _ => self.mode.as_str().to_string(),
        }
    }
}

/// Directive strings partitioned by enforcement. Order is preserved from the
/// input policy list and every input policy lands in exactly one bucket;
/// duplicates and conflicting modes pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Directives {
    enforced: Vec<String>,
    report_only: Vec<String>,
}

impl Directives {
    fn from_policies(policies: &[Policy]) -> Self {
        let mut directives = Directives::default();
        for policy in policies {
            let bucket = if policy.report_only {
                &mut directives.report_only
            } else {
                &mut directives.enforced
            };
            bucket.push(policy.directive());
        }
        directives
    }
}

/// The COOP interceptor: a precomputed pair of directive lists applied to
/// every response whose route does not override them.
#[derive(Debug, Clone)]
pub struct CoopInterceptor {
    directives: Directives,
}

impl CoopInterceptor {
    /// Build from an ordered policy list.
    ///
    /// The list is taken as-is: merging duplicates or resolving conflicting
    /// modes is not this layer's job.
    pub fn new(policies: &[Policy]) -> Self {
        Self { directives: Directives::from_policies(policies) }
    }

    /// The recommended posture: a single enforcing `same-origin` policy,
    /// reporting to `reporting_group` when one is given.
    pub fn same_origin_default(reporting_group: Option<&str>) -> Self {
        Self::new(&[Policy {
            mode: Mode::SameOrigin,
            reporting_group: reporting_group.map(str::to_owned),
            report_only: false,
        }])
    }

    /// Enforced directive strings, in input order.
    pub fn enforced(&self) -> &[String] {
        &self.directives.enforced
    }

    /// Report-only directive strings, in input order.
    pub fn report_only(&self) -> &[String] {
        &self.directives.report_only
    }
}

/// Claim both COOP header names and write `directives` into them.
///
/// An empty list suppresses the corresponding header, but the claim is taken
/// either way so nothing downstream can sneak a value in.
fn emit(rsp: &mut PendingResponse, directives: &Directives) -> Result<()> {
    rsp.headers
        .claim(CROSS_ORIGIN_OPENER_POLICY)?
        .set(&directives.enforced)?;
    rsp.headers
        .claim(CROSS_ORIGIN_OPENER_POLICY_REPORT_ONLY)?
        .set(&directives.report_only)?;
    Ok(())
}

impl Interceptor for CoopInterceptor {
    fn name(&self) -> &'static str {
        "coop"
    }

    fn before(
        &self,
        rsp: &mut PendingResponse,
        _req: &RequestHead,
        cfg: Option<&dyn InterceptorConfig>,
    ) -> Result<Flow> {
        let directives = match cfg.and_then(|cfg| cfg.as_any().downcast_ref::<CoopOverride>()) {
            Some(over) => &over.directives,
            None => &self.directives,
        };
        emit(rsp, directives)?;
        Ok(Flow::NotWritten)
    }

    fn commit(
        &self,
        _rsp: &mut PendingResponse,
        _req: &RequestHead,
        _cfg: Option<&dyn InterceptorConfig>,
    ) -> Result<Flow> {
        Ok(Flow::NotWritten)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Per-route substitute configuration for the COOP domain.
///
/// Structurally the same directive pair as the interceptor, tagged as its
/// own type so the pipeline can tell a route's override apart from the
/// installed default.
#[derive(Debug, Clone)]
pub struct CoopOverride {
    directives: Directives,
}

impl CoopOverride {
    /// Build from an ordered policy list, exactly like the interceptor. An
    /// empty list yields an override that suppresses both COOP headers.
    pub fn new(policies: &[Policy]) -> Self {
        Self { directives: Directives::from_policies(policies) }
    }

    /// Enforced directive strings, in input order.
    pub fn enforced(&self) -> &[String] {
        &self.directives.enforced
    }

    /// Report-only directive strings, in input order.
    pub fn report_only(&self) -> &[String] {
        &self.directives.report_only
    }
}

impl InterceptorConfig for CoopOverride {
    /// True for any COOP interceptor, whatever either side's policies are.
    fn matches(&self, interceptor: &dyn Interceptor) -> bool {
        interceptor.as_any().is::<CoopInterceptor>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
