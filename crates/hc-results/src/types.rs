//! Result data types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hc_core::{EdgeKey, Real};
use hc_graph::Label;
use hc_params::SimulationParameters;
use serde::{Deserialize, Serialize};

pub type ResultId = u64;

/// Solved values of one flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowResult {
    pub sequence: Vec<Real>,
    /// Installed capacity when the flow carries an investment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invest: Option<Real>,
}

impl FlowResult {
    pub fn total(&self) -> Real {
        self.sequence.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Flag(bool),
    Number(Real),
    Text(String),
}

impl Scalar {
    pub fn as_number(&self) -> Option<Real> {
        match self {
            Scalar::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Scalar::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

/// Input coefficients of one flow, as handed to the solver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeParameters {
    #[serde(default)]
    pub scalars: BTreeMap<String, Scalar>,
    #[serde(default)]
    pub sequences: BTreeMap<String, Vec<Real>>,
}

impl EdgeParameters {
    pub fn number(&self, key: &str) -> Option<Real> {
        self.scalars.get(key).and_then(Scalar::as_number)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.scalars.get(key).and_then(Scalar::as_flag)
    }

    pub fn sequence(&self, key: &str) -> Option<&[Real]> {
        self.sequences.get(key).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageResult {
    pub level: Vec<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invest: Option<Real>,
}

/// Everything a worker hands back. Keys are plain strings so the tables
/// survive serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResults {
    pub periods: usize,
    pub objective: Real,
    pub flows: BTreeMap<EdgeKey, FlowResult>,
    pub parameters: BTreeMap<EdgeKey, EdgeParameters>,
    /// Label of every node, keyed by node name.
    pub nodes: BTreeMap<String, Label>,
    #[serde(default)]
    pub storages: BTreeMap<String, StorageResult>,
}

impl RawResults {
    pub fn node(&self, name: &str) -> Option<&Label> {
        self.nodes.get(name)
    }

    pub fn target_has_tag(&self, edge: &EdgeKey, tag: &str) -> bool {
        self.node(&edge.target).is_some_and(|l| l.has_tag(tag))
    }

    pub fn source_has_tag(&self, edge: &EdgeKey, tag: &str) -> bool {
        self.node(&edge.source).is_some_and(|l| l.has_tag(tag))
    }
}

/// Cache index entry: which (scenario, parameters) produced which result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub scenario: String,
    pub parameters: SimulationParameters,
    pub parameter_hash: String,
    pub result_id: ResultId,
    pub created_at: DateTime<Utc>,
}
