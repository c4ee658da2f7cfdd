//! Stable edge identity across the worker serialization boundary.
//!
//! Edges are keyed by the names of their end nodes and rendered as
//! `"(source, target)"`. Keys serialize as plain strings so they can be used
//! directly as JSON object keys.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::HcError;

/// Separator between source and target in the string form.
pub const EDGE_SEPARATOR: &str = ", ";

/// Whether `name` survives the `"(source, target)"` round trip.
pub fn is_valid_node_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(EDGE_SEPARATOR) && !name.contains(['(', ')'])
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub source: String,
    pub target: String,
}

impl EdgeKey {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.source, self.target)
    }
}

impl FromStr for EdgeKey {
    type Err = HcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| HcError::InvalidEdgeKey(s.to_string()))?;
        let (source, target) = inner
            .split_once(EDGE_SEPARATOR)
            .ok_or_else(|| HcError::InvalidEdgeKey(s.to_string()))?;
        if source.is_empty() || target.is_empty() {
            return Err(HcError::InvalidEdgeKey(s.to_string()));
        }
        Ok(Self::new(source, target))
    }
}

impl Serialize for EdgeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EdgeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
