//! Combined heat and power scenarios (BHKW, BioBHKW).
//!
//! The CHP unit burns fuel into electricity and heat. Electricity is sold
//! to the grid through a feed-in converter, and a gas boiler covers the
//! peak load the CHP is not sized for.

use hc_core::{average_cost_per_year, Real};
use hc_demand::{DemandEntity, ProfileLibrary};
use hc_graph::{Flow, Label, Series};
use hc_params::{NeededParameters, ParameterSet};
use tracing::debug;

use crate::basic::basic_parameters;
use crate::boiler::BoilerScenario;
use crate::constants::*;
use crate::curves::{
    SizeCurve, BHKW_CAPEX, BHKW_EFFICIENCY, BIO_BHKW_CAPEX, BIO_BHKW_EFFICIENCY,
};
use crate::scenario::{fraction, investment, Scenario, TechnologyContext};
use crate::ScenarioResult;

pub const CHP_PARAMETERS: &[&str] = &[
    "capex",
    "lifetime",
    "conversion_factor_el",
    "conversion_factor_th",
    "co2_emissions",
    "minimal_load",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChpScenario {
    pub name: &'static str,
    pub component: &'static str,
    pub fuel_bus: &'static str,
    pub carrier: &'static str,
    pub fossil: bool,
    /// Specific capex in €/kW over installed size.
    pub capex_curve: SizeCurve,
    /// Electrical efficiency in percent over installed size.
    pub efficiency_curve: SizeCurve,
}

impl ChpScenario {
    pub const BHKW: ChpScenario = ChpScenario {
        name: "BHKW",
        component: "BHKW",
        fuel_bus: "b_gas",
        carrier: TAG_GAS,
        fossil: true,
        capex_curve: BHKW_CAPEX,
        efficiency_curve: BHKW_EFFICIENCY,
    };

    pub const BIO_BHKW: ChpScenario = ChpScenario {
        name: "BioBHKW",
        component: "BIO_BHKW",
        fuel_bus: "b_biogas",
        carrier: TAG_BIOGAS,
        fossil: false,
        capex_curve: BIO_BHKW_CAPEX,
        efficiency_curve: BIO_BHKW_EFFICIENCY,
    };

    /// Estimated CHP size in kW for a peak heat load.
    pub fn size_for_peak(peak_heat: Real) -> Real {
        peak_heat * BHKW_SIZE_PEAK_FACTOR
    }
}

impl Scenario for ChpScenario {
    fn name(&self) -> &'static str {
        self.name
    }

    fn needed_parameters(&self) -> NeededParameters {
        let needed = basic_parameters()
            .with("General", &["gas_price", "gas_rate", "bhkw_feedin_tariff"])
            .with(self.component, CHP_PARAMETERS);
        BoilerScenario::GAS.require(needed)
    }

    /// Replace `capex` and `conversion_factor_el` with the curve values for
    /// the estimated unit size.
    fn add_dynamic_parameters(
        &self,
        demand: &dyn DemandEntity,
        profiles: &ProfileLibrary,
        parameters: &mut ParameterSet,
    ) -> ScenarioResult<()> {
        let peak = demand
            .annual_heat_demand(profiles)?
            .into_iter()
            .fold(0.0, Real::max);
        let size = Self::size_for_peak(peak);
        let capex = self.capex_curve.evaluate(size)?;
        let efficiency = self.efficiency_curve.evaluate(size)?;
        debug!(
            scenario = self.name,
            size_kw = size,
            capex,
            efficiency,
            "derived CHP parameters"
        );
        parameters.set_value(self.component, "capex", capex);
        parameters.set_value(self.component, "conversion_factor_el", efficiency.trunc() as i64);
        Ok(())
    }

    fn add_technology(
        &self,
        ctx: &mut TechnologyContext<'_>,
        parameters: &ParameterSet,
    ) -> ScenarioResult<()> {
        let name = ctx.name().to_string();
        let c = self.component;
        let thermal_bus = ctx.thermal_bus;

        let fuel = ctx.builder.bus_or_insert(
            Label::bus(self.fuel_bus)
                .tag(TAG_PRIMARY_SOURCE)
                .tag(self.carrier),
            false,
        );
        let chp_el = ctx.builder.add_bus(
            Label::bus("b_bhkw_el")
                .belongs_to(name.as_str())
                .tag(TAG_ELECTRICITY),
            true,
        );
        let grid = ctx
            .builder
            .bus_or_insert(Label::bus("b_net_el").tag(TAG_GRID), false);

        let tariff = parameters.number("General", "bhkw_feedin_tariff")?;
        ctx.builder.add_converter(
            Label::converter(format!("transformer_from_{name}_el"))
                .belongs_to(name.as_str())
                .tag(TAG_FEED_IN),
            (chp_el, Flow::new().variable_costs(-tariff)),
            vec![(grid, Flow::new(), Series::Scalar(1.0))],
        );

        let lifetime = parameters.number(c, "lifetime")?;
        let fuel_price = average_cost_per_year(
            parameters.number("General", "gas_price")?,
            lifetime,
            parameters.number("General", "gas_rate")?,
        )?;
        let minimal_load =
            parameters.number(c, "minimal_load")? / parameters.number(c, "conversion_factor_th")?;
        let mut input = Flow::new()
            .variable_costs(fuel_price)
            .investment(investment(parameters, c, 0.0)?)
            .min(minimal_load)
            .co2_emissions(parameters.number(c, "co2_emissions")?);
        if self.fossil {
            input = input.fossil();
        }
        ctx.builder.add_converter(
            Label::converter(format!("{name}_chp"))
                .belongs_to(name.as_str())
                .tag(TAG_BHKW),
            (fuel, input),
            vec![
                (
                    chp_el,
                    Flow::new().co2_emissions(BHKW_ELECTRICITY_CO2),
                    Series::Scalar(fraction(parameters, c, "conversion_factor_el")?),
                ),
                (
                    thermal_bus,
                    Flow::new(),
                    Series::Scalar(fraction(parameters, c, "conversion_factor_th")?),
                ),
            ],
        );

        BoilerScenario::GAS.add_boiler(ctx, parameters)?;
        Ok(())
    }

    fn categories(&self) -> &'static [(&'static str, &'static str)] {
        &[
            (TAG_FEED_IN, "Feed-in"),
            (TAG_GAS, "Gas"),
            (TAG_BIOGAS, "Biogas"),
            (TAG_DEMAND, "Heat demand"),
            (TAG_EXCESS, "Excess heat"),
            (TAG_ELECTRICITY, "CHP electricity"),
            (TAG_BHKW, "CHP"),
            ("gas_heating", "Peak boiler"),
        ]
    }

    fn primary_factors(&self) -> &'static [(&'static str, Real)] {
        &[(TAG_GAS, PF_GAS), (TAG_BIOGAS, PF_BIOGAS)]
    }

    fn export_credit(&self) -> Option<Real> {
        Some(PF_DISPLACEMENT)
    }
}
