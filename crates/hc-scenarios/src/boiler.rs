//! Single fuel boiler scenarios: Gas, Oil and Woodchip.

use hc_core::{average_cost_per_year, NodeId, Real};
use hc_graph::{Flow, Label, Series};
use hc_params::{NeededParameters, ParameterSet};

use crate::basic::basic_parameters;
use crate::constants::*;
use crate::scenario::{fraction, investment, Scenario, TechnologyContext};
use crate::ScenarioResult;

/// How the fuel price of a boiler is derived from `General` parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelPrice {
    /// Mean price over the boiler lifetime, rising by `rate` percent a year.
    Escalated {
        price: &'static str,
        rate: &'static str,
    },
    Flat { price: &'static str },
}

impl FuelPrice {
    fn parameters(self) -> Vec<&'static str> {
        match self {
            FuelPrice::Escalated { price, rate } => vec![price, rate],
            FuelPrice::Flat { price } => vec![price],
        }
    }

    fn value(self, parameters: &ParameterSet, lifetime: Real) -> ScenarioResult<Real> {
        match self {
            FuelPrice::Escalated { price, rate } => Ok(average_cost_per_year(
                parameters.number("General", price)?,
                lifetime,
                parameters.number("General", rate)?,
            )?),
            FuelPrice::Flat { price } => Ok(parameters.number("General", price)?),
        }
    }
}

/// Static description of a boiler technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoilerScenario {
    pub name: &'static str,
    /// Parameter component holding capex, lifetime, opex, efficiency, co2.
    pub component: &'static str,
    pub fuel_bus: &'static str,
    pub carrier: &'static str,
    /// Tag and name suffix of the boiler node.
    pub technology: &'static str,
    pub price: FuelPrice,
    pub fossil: bool,
}

pub const BOILER_PARAMETERS: &[&str] =
    &["lifetime", "capex", "opex", "efficiency", "co2_emissions"];

impl BoilerScenario {
    pub const GAS: BoilerScenario = BoilerScenario {
        name: "Gas",
        component: "Gas",
        fuel_bus: "b_gas",
        carrier: TAG_GAS,
        technology: "gas_heating",
        price: FuelPrice::Escalated {
            price: "gas_price",
            rate: "gas_rate",
        },
        fossil: true,
    };

    pub const OIL: BoilerScenario = BoilerScenario {
        name: "Oil",
        component: "Oil",
        fuel_bus: "b_oil",
        carrier: TAG_OIL,
        technology: "oil_heating",
        price: FuelPrice::Escalated {
            price: "oil_price",
            rate: "oil_rate",
        },
        fossil: true,
    };

    pub const WOODCHIP: BoilerScenario = BoilerScenario {
        name: "Woodchip",
        component: "Woodchip",
        fuel_bus: "b_woodchip",
        carrier: TAG_WOODCHIP,
        technology: "woodchip_heating",
        price: FuelPrice::Flat {
            price: "woodchip_price",
        },
        fossil: false,
    };

    /// Add the unbalanced fuel bus (if missing) and the boiler feeding the
    /// demand's thermal bus.
    pub fn add_boiler(
        &self,
        ctx: &mut TechnologyContext<'_>,
        parameters: &ParameterSet,
    ) -> ScenarioResult<NodeId> {
        let fuel = ctx.builder.bus_or_insert(
            Label::bus(self.fuel_bus)
                .tag(TAG_PRIMARY_SOURCE)
                .tag(self.carrier),
            false,
        );

        let c = self.component;
        let lifetime = parameters.number(c, "lifetime")?;
        let mut input = Flow::new()
            .variable_costs(self.price.value(parameters, lifetime)?)
            .investment(investment(parameters, c, 0.0)?)
            .co2_emissions(parameters.number(c, "co2_emissions")?);
        if self.fossil {
            input = input.fossil();
        }
        let output = Flow::new().variable_costs(parameters.number(c, "opex")?);
        let efficiency = fraction(parameters, c, "efficiency")?;

        let name = ctx.name().to_string();
        let thermal_bus = ctx.thermal_bus;
        Ok(ctx.builder.add_converter(
            Label::converter(format!("{name}_{}", self.technology))
                .belongs_to(name.as_str())
                .tag(self.technology),
            (fuel, input),
            vec![(thermal_bus, output, Series::Scalar(efficiency))],
        ))
    }

    /// Add the parameters `add_boiler` reads.
    pub fn require(&self, needed: NeededParameters) -> NeededParameters {
        needed
            .with("General", &["wacc"])
            .with("General", &self.price.parameters())
            .with(self.component, BOILER_PARAMETERS)
    }
}

impl Scenario for BoilerScenario {
    fn name(&self) -> &'static str {
        self.name
    }

    fn needed_parameters(&self) -> NeededParameters {
        self.require(basic_parameters())
    }

    fn add_technology(
        &self,
        ctx: &mut TechnologyContext<'_>,
        parameters: &ParameterSet,
    ) -> ScenarioResult<()> {
        self.add_boiler(ctx, parameters)?;
        Ok(())
    }

    fn categories(&self) -> &'static [(&'static str, &'static str)] {
        match self.carrier {
            TAG_GAS => &[
                (TAG_GAS, "Gas"),
                (TAG_DEMAND, "Heat demand"),
                (TAG_EXCESS, "Excess heat"),
                ("gas_heating", "Gas heating"),
            ],
            TAG_OIL => &[
                (TAG_OIL, "Oil"),
                (TAG_DEMAND, "Heat demand"),
                (TAG_EXCESS, "Excess heat"),
                ("oil_heating", "Oil heating"),
            ],
            _ => &[
                (TAG_WOODCHIP, "Woodchip"),
                (TAG_DEMAND, "Heat demand"),
                (TAG_EXCESS, "Excess heat"),
                ("woodchip_heating", "Woodchip heating"),
            ],
        }
    }

    fn primary_factors(&self) -> &'static [(&'static str, Real)] {
        &[(TAG_GAS, PF_GAS), (TAG_OIL, PF_OIL), (TAG_WOODCHIP, PF_WOOD)]
    }
}
