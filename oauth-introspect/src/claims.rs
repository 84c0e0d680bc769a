//! Claim sets returned by token introspection (RFC 7662 §2.2)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Claims the identity provider associated with a token.
///
/// The set lives for a single request. It is never cached or persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Whether the provider considers the token active.
    ///
    /// `active` is a required member of an introspection response. Only a
    /// JSON `true` counts; a missing member or any other value does not.
    pub fn is_active(&self) -> bool {
        self.0
            .get("active")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Subject of the token, used for log lines
    pub fn subject(&self) -> Option<&str> {
        self.0.get("sub").and_then(Value::as_str)
    }

    pub fn client_id(&self) -> Option<&str> {
        self.0.get("client_id").and_then(Value::as_str)
    }

    /// Reads a claim as a set of strings.
    ///
    /// Accepts a JSON array (non-string members are skipped) or a single
    /// string. Returns `None` if the claim is absent or has another shape.
    pub fn string_set(&self, name: &str) -> Option<HashSet<&str>> {
        match self.0.get(name)? {
            Value::Array(values) => Some(values.iter().filter_map(Value::as_str).collect()),
            Value::String(value) => Some(HashSet::from([value.as_str()])),
            _ => None,
        }
    }

    /// Space-delimited `scope` claim
    pub fn scopes(&self) -> HashSet<&str> {
        self.0
            .get("scope")
            .and_then(Value::as_str)
            .map(|scope| scope.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes().contains(scope)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ClaimSet {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}
