use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::FixtureError;

/// The three collections served by the fixture.
///
/// Records are kept as raw JSON so fields the client ignores still travel
/// over the wire.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub accounts: Vec<Value>,
    #[serde(default)]
    pub groups: Vec<Value>,
    #[serde(default)]
    pub relationships: Vec<Value>,
}

impl Dataset {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub(crate) fn collection(&self, name: &str) -> Option<&[Value]> {
        match name {
            "accounts" => Some(&self.accounts),
            "groups" => Some(&self.groups),
            "relationships" => Some(&self.relationships),
            _ => None,
        }
    }
}

/// Exact-match predicate parsed from `filter=<field>=<value>`.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FieldFilter<'a> {
    field: &'a str,
    value: &'a str,
}

impl<'a> FieldFilter<'a> {
    pub(crate) fn parse(raw: &'a str) -> Option<Self> {
        let (field, value) = raw.split_once('=')?;
        if field.is_empty() {
            return None;
        }
        Some(Self { field, value })
    }

    /// Compares against the string form of the field; numbers and booleans
    /// match their JSON rendering.
    pub(crate) fn matches(&self, record: &Value) -> bool {
        match record.get(self.field) {
            Some(Value::String(s)) => s == self.value,
            Some(Value::Null) | None => false,
            Some(other) => other.to_string() == self.value,
        }
    }
}
