//! Claim values, immutable claim-sets and the generic claim accumulator.
//!
//! A claim value is an explicit tagged union rather than an opaque JSON
//! value: every coercion a caller can ask for (`string`, string set, epoch
//! instant, bool) is a total function over the union, returning `None` when
//! the stored shape cannot serve the request. Most claims are optional by the
//! surrounding protocols, so an absent or mismatched claim is never an error.
//!
//! `ClaimSet` is frozen at construction and safely shared across threads;
//! `ClaimSetBuilder` is the single-use mutable accumulator that produces it.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single claim value.
///
/// Wire inputs (JSON-decoded JWT payloads, introspection responses) carry
/// heterogeneous values; the union makes every accepted shape explicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    /// A boolean claim, e.g. introspection `active`.
    Bool(bool),
    /// An integer claim, e.g. epoch-second timestamps.
    Integer(i64),
    /// A floating-point claim.
    Float(f64),
    /// A string claim.
    String(String),
    /// A collection claim, e.g. a multi-valued audience.
    Array(Vec<ClaimValue>),
    /// A nested object claim.
    Object(BTreeMap<String, ClaimValue>),
}

impl ClaimValue {
    /// Coerce to a string.
    ///
    /// Scalars render through their canonical textual form; arrays and
    /// objects have no single-string reading and yield `None`.
    pub fn as_coerced_string(&self) -> Option<String> {
        match self {
            ClaimValue::String(s) => Some(s.clone()),
            ClaimValue::Integer(i) => Some(i.to_string()),
            ClaimValue::Float(f) => Some(f.to_string()),
            ClaimValue::Bool(b) => Some(b.to_string()),
            ClaimValue::Array(_) | ClaimValue::Object(_) => None,
        }
    }

    /// Interpret as a set of strings.
    ///
    /// A single string is a one-element set, a space-delimited string splits
    /// into its elements (the RFC 6749 `scope` encoding), and an array
    /// collects the string coercion of each element. Scalars coerce to a
    /// one-element set; objects yield `None`.
    pub fn as_string_set(&self) -> Option<BTreeSet<String>> {
        match self {
            ClaimValue::String(s) => Some(s.split_whitespace().map(str::to_owned).collect()),
            ClaimValue::Array(values) => Some(
                values
                    .iter()
                    .filter_map(ClaimValue::as_coerced_string)
                    .collect(),
            ),
            ClaimValue::Integer(_) | ClaimValue::Float(_) | ClaimValue::Bool(_) => {
                self.as_coerced_string().map(|s| BTreeSet::from([s]))
            }
            ClaimValue::Object(_) => None,
        }
    }

    /// Interpret as an epoch-seconds timestamp.
    ///
    /// Integers and floats are read as seconds since the Unix epoch; a
    /// numeric string is parsed first. Anything else yields `None`.
    pub fn as_epoch_instant(&self) -> Option<DateTime<Utc>> {
        let seconds = match self {
            ClaimValue::Integer(i) => Some(*i),
            ClaimValue::Float(f) => Some(*f as i64),
            ClaimValue::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }?;
        DateTime::from_timestamp(seconds, 0)
    }

    /// Interpret as a boolean, accepting the textual forms `true`/`false`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ClaimValue::Bool(b) => Some(*b),
            ClaimValue::String(s) => s.trim().parse::<bool>().ok(),
            _ => None,
        }
    }

    /// Convert a JSON value, dropping JSON `null` (an absent claim).
    pub fn from_json(value: serde_json::Value) -> Option<ClaimValue> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(b) => Some(ClaimValue::Bool(b)),
            serde_json::Value::Number(n) => Some(if let Some(i) = n.as_i64() {
                ClaimValue::Integer(i)
            } else {
                ClaimValue::Float(n.as_f64().unwrap_or_default())
            }),
            serde_json::Value::String(s) => Some(ClaimValue::String(s)),
            serde_json::Value::Array(values) => Some(ClaimValue::Array(
                values.into_iter().filter_map(ClaimValue::from_json).collect(),
            )),
            serde_json::Value::Object(map) => Some(ClaimValue::Object(
                map.into_iter()
                    .filter_map(|(k, v)| ClaimValue::from_json(v).map(|v| (k, v)))
                    .collect(),
            )),
        }
    }
}

impl From<ClaimValue> for serde_json::Value {
    fn from(value: ClaimValue) -> Self {
        match value {
            ClaimValue::Bool(b) => serde_json::Value::Bool(b),
            ClaimValue::Integer(i) => serde_json::Value::from(i),
            ClaimValue::Float(f) => serde_json::Value::from(f),
            ClaimValue::String(s) => serde_json::Value::String(s),
            ClaimValue::Array(values) => {
                serde_json::Value::Array(values.into_iter().map(Into::into).collect())
            }
            ClaimValue::Object(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        ClaimValue::Bool(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        ClaimValue::Integer(value)
    }
}

impl From<i32> for ClaimValue {
    fn from(value: i32) -> Self {
        ClaimValue::Integer(i64::from(value))
    }
}

impl From<u64> for ClaimValue {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(ClaimValue::Integer)
            .unwrap_or(ClaimValue::Float(value as f64))
    }
}

impl From<f64> for ClaimValue {
    fn from(value: f64) -> Self {
        ClaimValue::Float(value)
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        ClaimValue::String(value.to_owned())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        ClaimValue::String(value)
    }
}

impl From<DateTime<Utc>> for ClaimValue {
    fn from(value: DateTime<Utc>) -> Self {
        ClaimValue::Integer(value.timestamp())
    }
}

impl<T: Into<ClaimValue>> From<Vec<T>> for ClaimValue {
    fn from(values: Vec<T>) -> Self {
        ClaimValue::Array(values.into_iter().map(Into::into).collect())
    }
}

/// An immutable claim-set: a read-only view over a fixed name→value mapping.
///
/// Equality and `Debug` output are value-based over the underlying mapping.
/// Typed accessors return `None` for absent claims and best-effort coercions
/// for present ones; they never fail.
///
/// # Example
///
/// ```rust
/// use oauth2_claimset::ClaimSet;
///
/// let claims = ClaimSet::builder()
///     .claim("sub", "user123")
///     .claim("scope", "openid email")
///     .build();
///
/// assert_eq!(claims.get_as_string("sub").as_deref(), Some("user123"));
/// assert_eq!(claims.get_as_string_set("scope").unwrap().len(), 2);
/// assert!(claims.get_as_string("missing").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet {
    claims: BTreeMap<String, ClaimValue>,
}

impl ClaimSet {
    /// Create a builder for accumulating claims.
    pub fn builder() -> ClaimSetBuilder {
        ClaimSetBuilder::default()
    }

    /// Build from a JSON object, as produced by a decoded JWT payload or an
    /// introspection response. `null` members are dropped.
    pub fn from_json_object(object: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            claims: object
                .into_iter()
                .filter_map(|(k, v)| ClaimValue::from_json(v).map(|v| (k, v)))
                .collect(),
        }
    }

    /// Raw claim value, or `None` if absent.
    pub fn get(&self, name: &str) -> Option<&ClaimValue> {
        self.claims.get(name)
    }

    /// Claim coerced to a string, or `None` if absent.
    pub fn get_as_string(&self, name: &str) -> Option<String> {
        self.get(name).and_then(ClaimValue::as_coerced_string)
    }

    /// Claim interpreted as a set of strings, or `None` if absent.
    pub fn get_as_string_set(&self, name: &str) -> Option<BTreeSet<String>> {
        self.get(name).and_then(ClaimValue::as_string_set)
    }

    /// Claim interpreted as an epoch-seconds timestamp, or `None` if absent.
    pub fn get_as_instant(&self, name: &str) -> Option<DateTime<Utc>> {
        self.get(name).and_then(ClaimValue::as_epoch_instant)
    }

    /// Claim interpreted as a boolean, or `None` if absent.
    pub fn get_as_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ClaimValue::as_bool)
    }

    /// Whether a claim with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    /// Number of claims.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether the claim-set holds no claims at all.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Iterate over the claims in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClaimValue)> {
        self.claims.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Mutable claim accumulator, discarded after [`ClaimSetBuilder::build`].
///
/// `build` consumes the builder, so reuse after build is a compile error
/// rather than a runtime surprise. Not thread-safe; intended for one
/// construction cycle.
#[derive(Debug, Clone, Default)]
pub struct ClaimSetBuilder {
    claims: BTreeMap<String, ClaimValue>,
}

impl ClaimSetBuilder {
    /// Set a claim. Last write wins.
    pub fn claim(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.claims.insert(name.into(), value.into());
        self
    }

    /// Freeze the accumulated claims into an immutable [`ClaimSet`].
    pub fn build(self) -> ClaimSet {
        ClaimSet {
            claims: self.claims,
        }
    }
}
