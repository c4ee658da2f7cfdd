//! Basic system shared by every scenario and the build entry point.

use hc_core::TimeIndex;
use hc_demand::{DemandEntity, ProfileLibrary};
use hc_graph::{EnergySystem, EnergySystemBuilder, Flow, Label};
use hc_params::{NeededParameters, ParameterSet};
use tracing::debug;

use crate::constants::{TAG_DEMAND, TAG_EXCESS, TAG_HEAT};
use crate::scenario::{Scenario, TechnologyContext};
use crate::ScenarioResult;

/// Requirements common to all scenarios.
pub fn basic_parameters() -> NeededParameters {
    NeededParameters::new()
        .with("General", &["wacc", "net_costs"])
        .with("demand", &["index", "type"])
}

/// Build the energy system of `scenario` for one demand entity.
///
/// The heat profile is truncated to `periods` hours starting at hour 0.
/// Missing parameters are reported all at once before anything is built.
pub fn build_energy_system(
    scenario: &dyn Scenario,
    demand: &dyn DemandEntity,
    parameters: &ParameterSet,
    profiles: &ProfileLibrary,
    periods: usize,
) -> ScenarioResult<EnergySystem> {
    scenario.needed_parameters().check(parameters)?;

    let time_index = TimeIndex::hourly(periods)?;
    let heat = time_index.truncate(&demand.annual_heat_demand(profiles)?)?;
    let mut builder = EnergySystemBuilder::new(time_index);

    let name = demand.name();
    let thermal_bus = builder.add_bus(
        Label::bus(format!("b_{name}_th"))
            .belongs_to(name)
            .tag(TAG_HEAT),
        true,
    );
    let sink = builder.add_sink(
        Label::sink(format!("demand_{name}_th"))
            .belongs_to(name)
            .tag(TAG_DEMAND),
    );
    builder.connect(thermal_bus, sink, Flow::new().fixed(heat, 1.0));
    let excess = builder.add_sink(
        Label::sink(format!("excess_{name}_th"))
            .belongs_to(name)
            .tag(TAG_EXCESS),
    );
    builder.connect(thermal_bus, excess, Flow::new());

    let mut ctx = TechnologyContext {
        builder: &mut builder,
        demand,
        profiles,
        thermal_bus,
    };
    scenario.add_technology(&mut ctx, parameters)?;

    let system = builder.build()?;
    debug!(
        scenario = scenario.name(),
        demand = name,
        periods,
        nodes = system.nodes().len(),
        "energy system built"
    );
    Ok(system)
}
