//! Claimable response-header storage.
//!
//! Security interceptors take exclusive ownership of the header names they
//! manage by claiming them before the route service runs. A claim hands back
//! a one-shot setter for that name; any later claim of the same name, or a
//! plain `set` against it, fails instead of silently overwriting. This keeps
//! a handler from weakening a policy header another component already
//! decided on.

use std::collections::HashSet;

use http::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{CoopGateError, Result};

/// Multi-valued response headers under construction for one request.
///
/// Values for a name keep their insertion order. A name with no values is
/// simply absent from the finalized map.
#[derive(Debug, Default)]
pub struct ResponseHeaders {
    map: HeaderMap,
    claimed: HashSet<HeaderName>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take exclusive ownership of `name` and return its setter.
    ///
    /// The claim lasts for the rest of the response. A second claim of the
    /// same name fails with [`CoopGateError::HeaderClaimed`].
    pub fn claim(&mut self, name: HeaderName) -> Result<ClaimedHeader<'_>> {
        if !self.claimed.insert(name.clone()) {
            return Err(CoopGateError::HeaderClaimed(name));
        }
        Ok(ClaimedHeader { map: &mut self.map, name })
    }

    /// Set a single value for an unclaimed name.
    ///
    /// This is the path route services use for ordinary headers such as
    /// `content-type`. It fails with [`CoopGateError::HeaderClaimed`] when an
    /// interceptor owns the name.
    pub fn set(&mut self, name: HeaderName, value: &str) -> Result<()> {
        if self.claimed.contains(&name) {
            return Err(CoopGateError::HeaderClaimed(name));
        }
        let value = HeaderValue::from_str(value)
            .map_err(|_| CoopGateError::InvalidHeaderValue(name.clone()))?;
        self.map.insert(name, value);
        Ok(())
    }

    /// Whether `name` has been claimed by an interceptor.
    pub fn is_claimed(&self, name: &HeaderName) -> bool {
        self.claimed.contains(name)
    }

    /// Whether any value is currently recorded for `name`.
    pub fn contains(&self, name: &HeaderName) -> bool {
        self.map.contains_key(name)
    }

    /// All values recorded for `name`, in insertion order.
    pub fn values<'a>(&'a self, name: &HeaderName) -> impl Iterator<Item = &'a HeaderValue> {
        self.map.get_all(name).iter()
    }

    /// Finalize into a plain header map for the transport to emit.
    pub fn into_map(self) -> HeaderMap {
        self.map
    }
}

/// One-shot setter for a claimed header name.
#[derive(Debug)]
pub struct ClaimedHeader<'a> {
    map: &'a mut HeaderMap,
    name: HeaderName,
}

impl ClaimedHeader<'_> {
    /// Replace the values for the claimed name with `values`, in order.
    ///
    /// An empty sequence removes the name entirely, which is how a claimed
    /// header is suppressed from the response. Every value is validated
    /// before any is written, so a failure leaves the map untouched.
    pub fn set<I, S>(self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Vec::new();
        for value in values {
            let value = HeaderValue::from_str(value.as_ref())
                .map_err(|_| CoopGateError::InvalidHeaderValue(self.name.clone()))?;
            parsed.push(value);
        }
        self.map.remove(&self.name);
        for value in parsed {
            self.map.append(self.name.clone(), value);
        }
        Ok(())
    }
}
