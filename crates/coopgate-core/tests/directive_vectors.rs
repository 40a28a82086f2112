//! Golden vectors for COOP directive serialization and partitioning.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use coopgate_core::coop::{CoopInterceptor, Mode, Policy};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Vector {
    description: String,
    policy: Policy,
    directive: String,
}

fn load_vector(name: &str) -> Vector {
    let path = format!("{}/tests/vectors/{name}", env!("CARGO_MANIFEST_DIR"));
    let raw = fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {path}: {e}"));
    serde_json::from_str(&raw).unwrap_or_else(|e| panic!("parse {path}: {e}"))
}

const VECTORS: &[&str] = &[
    "mode_only_same_origin.json",
    "mode_only_allow_popups.json",
    "mode_only_unsafe_none.json",
    "group_enforcing.json",
    "group_report_only.json",
    "empty_group_bare_token.json",
];

#[test]
fn directives_match_golden_vectors() {
    for name in VECTORS {
        let v = load_vector(name);
        assert_eq!(v.policy.directive(), v.directive, "{name}: {}", v.description);

        // A single-policy interceptor lands the directive in the bucket the
        // report_only flag names, and only there.
        let it = CoopInterceptor::new(std::slice::from_ref(&v.policy));
        let (bucket, other) = if v.policy.report_only {
            (it.report_only(), it.enforced())
        } else {
            (it.enforced(), it.report_only())
        };
        assert_eq!(bucket, [v.directive.clone()], "{name}");
        assert!(other.is_empty(), "{name}");
    }
}

/// Hand-written inverse of [`Policy::directive`], used to check that the
/// serialization loses nothing for modes and non-empty groups.
fn reparse(directive: &str, report_only: bool) -> Policy {
    let (mode, group) = match directive.split_once("; report-to \"") {
        Some((mode, rest)) => {
            let group = rest.strip_suffix('"').expect("unterminated report-to group");
            (mode, Some(group.to_string()))
        }
        None => (directive, None),
    };
    Policy {
        mode: mode.parse::<Mode>().expect("unknown mode token"),
        reporting_group: group,
        report_only,
    }
}

#[test]
fn partition_is_lossless_and_ordered() {
    let policies = vec![
        Policy { mode: Mode::SameOrigin, reporting_group: Some("a".into()), report_only: false },
        Policy { mode: Mode::UnsafeNone, reporting_group: None, report_only: true },
        // exact duplicate, kept verbatim
        Policy { mode: Mode::SameOrigin, reporting_group: Some("a".into()), report_only: false },
        Policy {
            mode: Mode::SameOriginAllowPopups,
            reporting_group: Some("b".into()),
            report_only: true,
        },
        Policy::new(Mode::UnsafeNone),
    ];
    let it = CoopInterceptor::new(&policies);
    assert_eq!(it.enforced().len() + it.report_only().len(), policies.len());

    let roundtripped: Vec<Policy> = it
        .enforced()
        .iter()
        .map(|d| reparse(d, false))
        .chain(it.report_only().iter().map(|d| reparse(d, true)))
        .collect();

    // Stable sort: enforced land first, input order kept inside each bucket.
    let mut expected = policies.clone();
    expected.sort_by_key(|p| p.report_only);
    assert_eq!(roundtripped, expected);
}

#[test]
fn same_origin_default_without_group() {
    let it = CoopInterceptor::same_origin_default(None);
    assert_eq!(it.enforced(), ["same-origin"]);
    assert!(it.report_only().is_empty());
}

#[test]
fn same_origin_default_with_group() {
    let it = CoopInterceptor::same_origin_default(Some("coop-endpoint"));
    assert_eq!(it.enforced(), ["same-origin; report-to \"coop-endpoint\""]);
    assert!(it.report_only().is_empty());
}

#[test]
fn same_origin_default_treats_empty_group_as_absent() {
    assert_eq!(
        CoopInterceptor::same_origin_default(Some("")).enforced(),
        CoopInterceptor::same_origin_default(None).enforced(),
    );
}

#[test]
fn mode_tokens_round_trip_through_from_str() {
    for mode in [Mode::SameOrigin, Mode::SameOriginAllowPopups, Mode::UnsafeNone] {
        assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
    }
    assert!("same_origin".parse::<Mode>().is_err());
}

#[test]
fn unknown_policy_fields_are_rejected() {
    let parsed = serde_json::from_str::<Policy>(r#"{ "mode": "same-origin", "coep": true }"#);
    assert!(parsed.is_err());
}
