//! Backend-neutral LP representation and its assembly from a graph.

use std::collections::HashMap;

use hc_core::{FlowId, NodeId, Real};
use hc_graph::{EnergySystem, NodeKind};

use crate::error::{SolverError, SolverResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Le,
    Ge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LpVar {
    pub cost: Real,
    pub lower: Real,
    pub upper: Real,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LpConstraint {
    pub terms: Vec<(VarId, Real)>,
    pub op: Comparison,
    pub rhs: Real,
}

/// Minimization problem over non-negative bounded variables.
#[derive(Debug, Clone, Default)]
pub struct LpModel {
    pub vars: Vec<LpVar>,
    pub constraints: Vec<LpConstraint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    pub objective: Real,
    pub values: Vec<Real>,
}

impl LpSolution {
    pub fn value(&self, var: VarId) -> Real {
        self.values.get(var.0).copied().unwrap_or(0.0)
    }
}

impl LpModel {
    pub fn add_var(&mut self, cost: Real, lower: Real, upper: Real) -> VarId {
        self.vars.push(LpVar { cost, lower, upper });
        VarId(self.vars.len() - 1)
    }

    pub fn add_constraint(&mut self, terms: Vec<(VarId, Real)>, op: Comparison, rhs: Real) {
        self.constraints.push(LpConstraint { terms, op, rhs });
    }
}

/// Variable layout of an assembled energy system.
#[derive(Debug, Clone, Default)]
pub struct VarMap {
    /// `flow[flow index][t]`
    pub flow: Vec<Vec<VarId>>,
    pub flow_invest: HashMap<FlowId, VarId>,
    pub storage_level: HashMap<NodeId, Vec<VarId>>,
    pub storage_invest: HashMap<NodeId, VarId>,
}

fn ensure_bound(value: Real, what: &str) -> SolverResult<Real> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SolverError::ModelSetup {
            what: format!("{what} must be finite and non-negative, got {value}"),
        })
    }
}

/// Translate the system into an LP.
pub fn assemble(system: &EnergySystem) -> SolverResult<(LpModel, VarMap)> {
    let periods = system.periods();
    let mut model = LpModel::default();
    let mut vars = VarMap::default();

    for edge in system.flows() {
        let flow = &edge.flow;
        let key = system.edge_key(edge);

        let invest = match &flow.investment {
            Some(inv) => {
                let max = match inv.maximum {
                    Some(m) => ensure_bound(m, &format!("investment maximum of {key}"))?,
                    None => Real::INFINITY,
                };
                let var = model.add_var(inv.ep_costs, 0.0, max);
                vars.flow_invest.insert(edge.id, var);
                Some(var)
            }
            None => None,
        };

        let mut per_hour = Vec::with_capacity(periods);
        for t in 0..periods {
            let cost = flow.variable_costs.at(t);
            let var = match (&flow.fixed_profile, invest, flow.nominal_value) {
                (Some(profile), None, Some(nominal)) => {
                    let v = ensure_bound(nominal * profile[t], &format!("fixed value of {key}"))?;
                    model.add_var(cost, v, v)
                }
                (Some(profile), Some(inv), _) => {
                    let var = model.add_var(cost, 0.0, Real::INFINITY);
                    model.add_constraint(vec![(var, 1.0), (inv, -profile[t])], Comparison::Eq, 0.0);
                    var
                }
                (None, Some(inv), _) => {
                    let var = model.add_var(cost, 0.0, Real::INFINITY);
                    model.add_constraint(vec![(var, 1.0), (inv, -1.0)], Comparison::Le, 0.0);
                    if let Some(min) = flow.min.filter(|m| *m > 0.0) {
                        model.add_constraint(vec![(var, 1.0), (inv, -min)], Comparison::Ge, 0.0);
                    }
                    var
                }
                (_, None, Some(nominal)) => {
                    let upper = ensure_bound(nominal, &format!("nominal value of {key}"))?;
                    let lower = flow.min.map_or(0.0, |m| m * upper);
                    model.add_var(cost, lower, upper)
                }
                (_, None, None) => model.add_var(cost, 0.0, Real::INFINITY),
            };
            per_hour.push(var);
        }
        vars.flow.push(per_hour);
    }

    for node in system.nodes() {
        let inputs: Vec<usize> = system
            .inputs(node.id)
            .map(|f| f.id.index() as usize)
            .collect();
        let outputs: Vec<usize> = system
            .outputs(node.id)
            .map(|f| f.id.index() as usize)
            .collect();

        match &node.kind {
            NodeKind::Bus { balanced: true } => {
                for t in 0..periods {
                    let mut terms: Vec<(VarId, Real)> =
                        inputs.iter().map(|&f| (vars.flow[f][t], 1.0)).collect();
                    terms.extend(outputs.iter().map(|&f| (vars.flow[f][t], -1.0)));
                    if !terms.is_empty() {
                        model.add_constraint(terms, Comparison::Eq, 0.0);
                    }
                }
            }
            NodeKind::Bus { balanced: false } | NodeKind::Source | NodeKind::Sink => {}
            NodeKind::Converter { conversion } => {
                let input = inputs.first().copied().ok_or_else(|| SolverError::ModelSetup {
                    what: format!("converter '{}' has no input", node.label.name),
                })?;
                for &out in &outputs {
                    let target = system.flows()[out].target;
                    let factor = conversion.get(&target).ok_or_else(|| SolverError::ModelSetup {
                        what: format!("converter '{}' lacks a conversion factor", node.label.name),
                    })?;
                    for t in 0..periods {
                        model.add_constraint(
                            vec![(vars.flow[out][t], 1.0), (vars.flow[input][t], -factor.at(t))],
                            Comparison::Eq,
                            0.0,
                        );
                    }
                }
            }
            NodeKind::Storage(params) => {
                let capacity_var = match &params.investment {
                    Some(inv) => {
                        let max = inv.maximum.unwrap_or(Real::INFINITY);
                        let var = model.add_var(inv.ep_costs, 0.0, max);
                        vars.storage_invest.insert(node.id, var);
                        Some(var)
                    }
                    None => None,
                };
                let upper = match (capacity_var, params.nominal_capacity) {
                    (None, Some(cap)) => ensure_bound(cap, "storage capacity")?,
                    _ => Real::INFINITY,
                };
                let levels: Vec<VarId> = (0..periods)
                    .map(|_| model.add_var(0.0, 0.0, upper))
                    .collect();
                if let Some(cap) = capacity_var {
                    for &level in &levels {
                        model.add_constraint(vec![(level, 1.0), (cap, -1.0)], Comparison::Le, 0.0);
                    }
                }
                // level[t] = level[t-1] * (1 - loss) + in * eta_in - out / eta_out, cyclic
                for t in 0..periods {
                    let prev = levels[(t + periods - 1) % periods];
                    let mut terms = vec![(levels[t], 1.0)];
                    if prev == levels[t] {
                        terms[0].1 -= 1.0 - params.loss_rate;
                    } else {
                        terms.push((prev, -(1.0 - params.loss_rate)));
                    }
                    for &f in &inputs {
                        terms.push((vars.flow[f][t], -params.inflow_efficiency));
                    }
                    for &f in &outputs {
                        terms.push((vars.flow[f][t], 1.0 / params.outflow_efficiency));
                    }
                    model.add_constraint(terms, Comparison::Eq, 0.0);
                }
                vars.storage_level.insert(node.id, levels);
            }
        }
    }

    Ok((model, vars))
}
