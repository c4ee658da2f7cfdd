//! The capability set every technology scenario implements.

use hc_core::{annuity, EdgeKey, NodeId, Real};
use hc_demand::{DemandEntity, ProfileLibrary};
use hc_graph::{EnergySystemBuilder, Investment};
use hc_params::{NeededParameters, ParameterSet};
use hc_results::RawResults;

use crate::constants::OTHER_LABEL;
use crate::primary::{self, PrimaryEnergy};
use crate::ScenarioResult;

/// What a scenario gets to work with while wiring its technology.
pub struct TechnologyContext<'a> {
    pub builder: &'a mut EnergySystemBuilder,
    pub demand: &'a dyn DemandEntity,
    pub profiles: &'a ProfileLibrary,
    /// Thermal bus of the demand entity, created by the basic system.
    pub thermal_bus: NodeId,
}

impl TechnologyContext<'_> {
    pub fn name(&self) -> &str {
        self.demand.name()
    }

    /// Named profile cut to the simulation horizon.
    pub fn profile(&self, name: &str) -> ScenarioResult<Vec<Real>> {
        let full = self.profiles.get(name)?;
        Ok(self.builder.time_index().truncate(full)?)
    }
}

/// One technology configuration.
///
/// Implementations are stateless; the registry hands out `&'static`
/// instances.
pub trait Scenario: Send + Sync {
    /// Registry key, also the scenario name stored in simulation records.
    fn name(&self) -> &'static str;

    /// Parameters that must be present, per component.
    fn needed_parameters(&self) -> NeededParameters;

    /// Derive parameters that depend on the demand entity (for example a
    /// size-dependent capex). Runs before the parameters are hashed and
    /// only replaces values, so derived keys are still required in the
    /// reference data.
    fn add_dynamic_parameters(
        &self,
        _demand: &dyn DemandEntity,
        _profiles: &ProfileLibrary,
        _parameters: &mut ParameterSet,
    ) -> ScenarioResult<()> {
        Ok(())
    }

    /// Extend the basic system with this technology's supply side.
    fn add_technology(
        &self,
        ctx: &mut TechnologyContext<'_>,
        parameters: &ParameterSet,
    ) -> ScenarioResult<()>;

    /// `(tag, category)` pairs in priority order. An edge lands in the
    /// category of the first tag carried by either of its end nodes.
    fn categories(&self) -> &'static [(&'static str, &'static str)];

    /// Primary energy factor per carrier tag of a supplying bus.
    fn primary_factors(&self) -> &'static [(&'static str, Real)];

    /// Factor credited for electricity exported to the grid, if any.
    fn export_credit(&self) -> Option<Real> {
        None
    }

    /// Comparison category of a raw edge key.
    fn data_label(&self, edge: &EdgeKey, results: &RawResults, suffix: bool) -> String {
        let source = results.node(&edge.source);
        let target = results.node(&edge.target);
        let category = self
            .categories()
            .iter()
            .find(|(tag, _)| {
                source.is_some_and(|l| l.has_tag(tag)) || target.is_some_and(|l| l.has_tag(tag))
            })
            .map_or(OTHER_LABEL, |(_, category)| *category);

        let owner = source
            .and_then(|l| l.belongs_to.as_deref())
            .or_else(|| target.and_then(|l| l.belongs_to.as_deref()));
        match owner {
            Some(owner) if suffix => format!("{category} ({owner})"),
            _ => category.to_string(),
        }
    }

    fn primary_factor_and_energy(&self, results: &RawResults) -> PrimaryEnergy {
        primary::account(results, self.primary_factors(), self.export_credit())
    }
}

/// Percent parameter converted to a fraction.
pub(crate) fn fraction(
    parameters: &ParameterSet,
    component: &str,
    parameter: &str,
) -> ScenarioResult<Real> {
    Ok(parameters.number(component, parameter)? / 100.0)
}

/// Investment option from a component's `capex` and `lifetime`.
///
/// `extra_ep_costs` is added to the annuity (fixed yearly opex).
pub(crate) fn investment(
    parameters: &ParameterSet,
    component: &str,
    extra_ep_costs: Real,
) -> ScenarioResult<Investment> {
    let wacc = fraction(parameters, "General", "wacc")?;
    let capex = parameters.number(component, "capex")?;
    let lifetime = parameters.number(component, "lifetime")?;
    let ep_costs = annuity(capex, lifetime, wacc)? + extra_ep_costs;
    Ok(Investment::new(ep_costs).capex(capex))
}
