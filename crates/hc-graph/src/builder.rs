//! Incremental energy-system builder.

use std::collections::HashMap;

use hc_core::{FlowId, NodeId, TimeIndex};

use crate::error::{GraphError, GraphResult};
use crate::flow::{Flow, Series};
use crate::label::Label;
use crate::system::{EnergySystem, FlowEdge, Node, NodeKind, StorageParams};
use crate::validate;

/// Builder for constructing an energy system incrementally.
///
/// Add nodes and flows, then call `build()` to validate and freeze the
/// result into an immutable `EnergySystem`.
#[derive(Debug)]
pub struct EnergySystemBuilder {
    time_index: TimeIndex,
    nodes: Vec<Node>,
    flows: Vec<FlowEdge>,
}

impl EnergySystemBuilder {
    pub fn new(time_index: TimeIndex) -> Self {
        Self {
            time_index,
            nodes: Vec::new(),
            flows: Vec::new(),
        }
    }

    pub fn time_index(&self) -> &TimeIndex {
        &self.time_index
    }

    fn add_node(&mut self, label: Label, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.nodes.push(Node { id, label, kind });
        id
    }

    pub fn add_bus(&mut self, label: Label, balanced: bool) -> NodeId {
        self.add_node(label, NodeKind::Bus { balanced })
    }

    /// Return the named bus, adding it first when it does not exist yet.
    pub fn bus_or_insert(&mut self, label: Label, balanced: bool) -> NodeId {
        match self.node_id(&label.name) {
            Some(id) => id,
            None => self.add_bus(label, balanced),
        }
    }

    pub fn add_source(&mut self, label: Label) -> NodeId {
        self.add_node(label, NodeKind::Source)
    }

    pub fn add_sink(&mut self, label: Label) -> NodeId {
        self.add_node(label, NodeKind::Sink)
    }

    pub fn add_storage(&mut self, label: Label, params: StorageParams) -> NodeId {
        self.add_node(label, NodeKind::Storage(params))
    }

    /// Add a converter with one input and one or more outputs.
    ///
    /// Each output carries its conversion factor as a fraction.
    pub fn add_converter(
        &mut self,
        label: Label,
        input: (NodeId, Flow),
        outputs: Vec<(NodeId, Flow, Series)>,
    ) -> NodeId {
        let conversion = outputs
            .iter()
            .map(|(target, _, factor)| (*target, factor.clone()))
            .collect::<HashMap<_, _>>();
        let id = self.add_node(label, NodeKind::Converter { conversion });
        let (source, flow) = input;
        self.connect(source, id, flow);
        for (target, flow, _) in outputs {
            self.connect(id, target, flow);
        }
        id
    }

    pub fn connect(&mut self, source: NodeId, target: NodeId, flow: Flow) -> FlowId {
        let id = FlowId::from_index(self.flows.len() as u32);
        self.flows.push(FlowEdge {
            id,
            source,
            target,
            flow,
        });
        id
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.label.name == name).map(|n| n.id)
    }

    /// Like `node_id`, but a missing node is an error.
    pub fn require(&self, name: &str) -> GraphResult<NodeId> {
        self.node_id(name).ok_or_else(|| GraphError::NameNotFound {
            name: name.to_string(),
        })
    }

    /// Build and validate the system.
    pub fn build(self) -> GraphResult<EnergySystem> {
        let by_name = validate::validate_names(&self.nodes)?;
        validate::validate_flows(&self.nodes, &self.flows, self.time_index.periods)?;
        validate::validate_nodes(&self.nodes, &self.flows, self.time_index.periods)?;

        Ok(EnergySystem {
            time_index: self.time_index,
            nodes: self.nodes,
            flows: self.flows,
            by_name,
        })
    }
}
