//! Immutable energy system.

use std::collections::HashMap;

use hc_core::{EdgeKey, FlowId, NodeId, Real, TimeIndex};

use crate::flow::{Flow, Investment, Series};
use crate::label::Label;

#[derive(Debug, Clone, PartialEq)]
pub struct StorageParams {
    /// Fixed capacity; ignored when `investment` is set.
    pub nominal_capacity: Option<Real>,
    pub investment: Option<Investment>,
    /// Relative loss per hour.
    pub loss_rate: Real,
    pub inflow_efficiency: Real,
    pub outflow_efficiency: Real,
}

impl Default for StorageParams {
    fn default() -> Self {
        Self {
            nominal_capacity: None,
            investment: None,
            loss_rate: 0.0,
            inflow_efficiency: 1.0,
            outflow_efficiency: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Unbalanced buses act as unlimited source and sink of their carrier.
    Bus { balanced: bool },
    Source,
    Sink,
    /// Output flow = factor[t] * input flow, per output node.
    Converter { conversion: HashMap<NodeId, Series> },
    Storage(StorageParams),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub label: Label,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowEdge {
    pub id: FlowId,
    pub source: NodeId,
    pub target: NodeId,
    pub flow: Flow,
}

/// A validated flow graph over a fixed hourly time index.
#[derive(Debug, Clone)]
pub struct EnergySystem {
    pub(crate) time_index: TimeIndex,
    pub(crate) nodes: Vec<Node>,
    pub(crate) flows: Vec<FlowEdge>,
    pub(crate) by_name: HashMap<String, NodeId>,
}

impl EnergySystem {
    pub fn time_index(&self) -> &TimeIndex {
        &self.time_index
    }

    pub fn periods(&self) -> usize {
        self.time_index.periods
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn flows(&self) -> &[FlowEdge] {
        &self.flows
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index() as usize)
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.by_name.get(name).and_then(|id| self.node(*id))
    }

    pub fn inputs(&self, node: NodeId) -> impl Iterator<Item = &FlowEdge> {
        self.flows.iter().filter(move |f| f.target == node)
    }

    pub fn outputs(&self, node: NodeId) -> impl Iterator<Item = &FlowEdge> {
        self.flows.iter().filter(move |f| f.source == node)
    }

    /// Stable string identity of a flow.
    pub fn edge_key(&self, flow: &FlowEdge) -> EdgeKey {
        let name = |id: NodeId| {
            self.node(id)
                .map(|n| n.label.name.clone())
                .unwrap_or_default()
        };
        EdgeKey::new(name(flow.source), name(flow.target))
    }

    pub fn nodes_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |n| n.label.has_tag(tag))
    }
}
