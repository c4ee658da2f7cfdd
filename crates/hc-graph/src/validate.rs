//! Energy-system validation.

use std::collections::HashMap;

use hc_core::{is_valid_node_name, NodeId};

use crate::error::{GraphError, GraphResult};
use crate::flow::Series;
use crate::system::{FlowEdge, Node, NodeKind};

const MAX_CONVERSION_FACTOR: f64 = 10.0;

pub(crate) fn validate_names(nodes: &[Node]) -> GraphResult<HashMap<String, NodeId>> {
    let mut by_name = HashMap::with_capacity(nodes.len());
    for node in nodes {
        if !is_valid_node_name(&node.label.name) {
            return Err(GraphError::InvalidName {
                name: node.label.name.clone(),
            });
        }
        if by_name.insert(node.label.name.clone(), node.id).is_some() {
            return Err(GraphError::DuplicateName {
                name: node.label.name.clone(),
            });
        }
    }
    Ok(by_name)
}

fn edge_name(nodes: &[Node], flow: &FlowEdge) -> String {
    let name = |id: NodeId| nodes[id.index() as usize].label.name.as_str();
    format!("({}, {})", name(flow.source), name(flow.target))
}

fn check_series(what: impl FnOnce() -> String, series: &Series, periods: usize) -> GraphResult<()> {
    match series.hourly_len() {
        Some(len) if len != periods => Err(GraphError::SeriesLength {
            what: what(),
            len,
            periods,
        }),
        _ => Ok(()),
    }
}

pub(crate) fn validate_flows(nodes: &[Node], flows: &[FlowEdge], periods: usize) -> GraphResult<()> {
    for flow in flows {
        for node in [flow.source, flow.target] {
            if node.index() as usize >= nodes.len() {
                return Err(GraphError::InvalidNodeRef { node });
            }
        }
        let edge = edge_name(nodes, flow);
        let f = &flow.flow;

        check_series(|| format!("variable_costs of {edge}"), &f.variable_costs, periods)?;
        if let Some(profile) = &f.fixed_profile {
            if profile.len() != periods {
                return Err(GraphError::SeriesLength {
                    what: format!("fixed profile of {edge}"),
                    len: profile.len(),
                    periods,
                });
            }
            if f.nominal_value.is_none() && f.investment.is_none() {
                return Err(GraphError::InvalidFlow {
                    edge,
                    reason: "fixed profile needs a nominal value or an investment".to_string(),
                });
            }
        }
        if let Some(min) = f.min {
            if !(0.0..=1.0).contains(&min) {
                return Err(GraphError::InvalidFlow {
                    edge,
                    reason: format!("relative minimum {min} outside [0, 1]"),
                });
            }
        }
        if let Some(inv) = &f.investment {
            if !inv.ep_costs.is_finite() || inv.maximum.is_some_and(|m| !(m >= 0.0)) {
                return Err(GraphError::InvalidFlow {
                    edge,
                    reason: "investment needs finite costs and a non-negative maximum".to_string(),
                });
            }
        }
        if f.variable_costs.values().any(|v| !v.is_finite()) {
            return Err(GraphError::InvalidFlow {
                edge,
                reason: "non-finite variable costs".to_string(),
            });
        }
    }
    Ok(())
}

pub(crate) fn validate_nodes(nodes: &[Node], flows: &[FlowEdge], periods: usize) -> GraphResult<()> {
    for node in nodes {
        let inputs = flows.iter().filter(|f| f.target == node.id).count();
        let outputs: Vec<&FlowEdge> = flows.iter().filter(|f| f.source == node.id).collect();
        let invalid = |reason| GraphError::InvalidConnection {
            node: node.label.name.clone(),
            reason,
        };

        match &node.kind {
            NodeKind::Bus { .. } => {}
            NodeKind::Source => {
                if inputs > 0 {
                    return Err(invalid("sources cannot have inputs"));
                }
            }
            NodeKind::Sink => {
                if !outputs.is_empty() {
                    return Err(invalid("sinks cannot have outputs"));
                }
            }
            NodeKind::Storage(_) => {
                if inputs > 1 || outputs.len() > 1 {
                    return Err(invalid("storage takes at most one inflow and one outflow"));
                }
            }
            NodeKind::Converter { conversion } => {
                if inputs != 1 {
                    return Err(invalid("converters need exactly one input"));
                }
                if outputs.is_empty() {
                    return Err(invalid("converters need at least one output"));
                }
                for out in outputs {
                    let target = &nodes[out.target.index() as usize].label.name;
                    let bad = || GraphError::InvalidConversion {
                        converter: node.label.name.clone(),
                        output: target.clone(),
                    };
                    let factor = conversion.get(&out.target).ok_or_else(bad)?;
                    check_series(
                        || format!("conversion factor {} -> {}", node.label.name, target),
                        factor,
                        periods,
                    )?;
                    if factor
                        .values()
                        .any(|v| !(v > 0.0 && v <= MAX_CONVERSION_FACTOR))
                    {
                        return Err(bad());
                    }
                }
            }
        }
    }
    Ok(())
}
