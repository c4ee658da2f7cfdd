//! Solve an energy system and unpack raw results.

use std::time::Instant;

use hc_graph::{EnergySystem, Flow, NodeKind, Series};
use hc_results::{EdgeParameters, FlowResult, RawResults, Scalar, StorageResult};
use tracing::info;

use crate::backend::{MinilpBackend, SolveOptions, SolverBackend};
use crate::error::SolverResult;
use crate::model::{assemble, LpSolution, VarMap};

/// Solve with the bundled LP backend.
pub fn simulate(system: EnergySystem, options: &SolveOptions) -> SolverResult<RawResults> {
    simulate_with(system, &MinilpBackend, options)
}

/// Build the model, solve it and return flow/parameter tables.
///
/// The system is consumed: one build, one solve.
pub fn simulate_with(
    system: EnergySystem,
    backend: &dyn SolverBackend,
    options: &SolveOptions,
) -> SolverResult<RawResults> {
    let started = Instant::now();
    let (model, vars) = assemble(&system)?;
    info!(
        periods = system.periods(),
        nodes = system.nodes().len(),
        flows = system.flows().len(),
        vars = model.vars.len(),
        backend = backend.name(),
        "solving energy system"
    );
    let solution = backend.solve(&model, options)?;
    let results = extract(&system, &vars, &solution);
    info!(
        objective = results.objective,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "energy system solved"
    );
    Ok(results)
}

fn series_param(params: &mut EdgeParameters, key: &str, series: &Series) {
    match series {
        Series::Scalar(v) => {
            params.scalars.insert(key.to_string(), Scalar::Number(*v));
        }
        Series::Hourly(values) => {
            params.sequences.insert(key.to_string(), values.clone());
        }
    }
}

fn flow_parameters(flow: &Flow) -> EdgeParameters {
    let mut params = EdgeParameters::default();
    let mut number = |key: &str, value: Option<f64>| {
        if let Some(v) = value {
            params.scalars.insert(key.to_string(), Scalar::Number(v));
        }
    };
    number("nominal_value", flow.nominal_value);
    number("min", flow.min);
    number("co2_emissions", flow.co2_emissions);
    if let Some(inv) = &flow.investment {
        number("investment_ep_costs", Some(inv.ep_costs));
        number("investment_capex", inv.capex);
        number("investment_maximum", inv.maximum);
    }
    series_param(&mut params, "variable_costs", &flow.variable_costs);
    if let Some(profile) = &flow.fixed_profile {
        params
            .sequences
            .insert("fixed_profile".to_string(), profile.clone());
    }
    params
        .scalars
        .insert("is_fossil".to_string(), Scalar::Flag(flow.is_fossil));
    params
}

fn extract(system: &EnergySystem, vars: &VarMap, solution: &LpSolution) -> RawResults {
    let mut results = RawResults {
        periods: system.periods(),
        objective: solution.objective,
        ..RawResults::default()
    };

    for node in system.nodes() {
        results
            .nodes
            .insert(node.label.name.clone(), node.label.clone());
    }

    for edge in system.flows() {
        let key = system.edge_key(edge);
        let sequence = vars.flow[edge.id.index() as usize]
            .iter()
            .map(|v| solution.value(*v))
            .collect();
        let invest = vars.flow_invest.get(&edge.id).map(|v| solution.value(*v));

        let mut params = flow_parameters(&edge.flow);
        if let Some(NodeKind::Converter { conversion }) = system.node(edge.source).map(|n| &n.kind) {
            if let Some(factor) = conversion.get(&edge.target) {
                series_param(&mut params, "conversion_factor", factor);
            }
        }

        results.flows.insert(key.clone(), FlowResult { sequence, invest });
        results.parameters.insert(key, params);
    }

    for (node_id, levels) in &vars.storage_level {
        let Some(node) = system.node(*node_id) else {
            continue;
        };
        results.storages.insert(
            node.label.name.clone(),
            StorageResult {
                level: levels.iter().map(|v| solution.value(*v)).collect(),
                invest: vars.storage_invest.get(node_id).map(|v| solution.value(*v)),
            },
        );
    }

    results
}
