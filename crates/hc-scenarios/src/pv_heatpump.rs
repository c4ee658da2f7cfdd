//! Heat pump supplied by rooftop PV and the grid.

use hc_core::Real;
use hc_demand::{PV_PROFILE, TEMPERATURE_PROFILE};
use hc_graph::{Flow, Label, Series};
use hc_params::{NeededParameters, ParameterSet};

use crate::basic::basic_parameters;
use crate::constants::*;
use crate::scenario::{investment, Scenario, TechnologyContext};
use crate::ScenarioResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PvHeatpumpScenario;

/// Heating supply temperature at ambient temperature `t_amb`.
///
/// Rises linearly from `T_SUPPLY_MIN` at the end of the heating period to
/// `t_max` at the design minimum and stays flat outside that range.
pub fn supply_temperature(t_amb: Real, radiator: bool) -> Real {
    let t_max = if radiator {
        T_SUPPLY_MAX_RADIATOR
    } else {
        T_SUPPLY_MAX_FLOOR
    };
    let share = ((T_HEAT_PERIOD - t_amb) / (T_HEAT_PERIOD - T_AMB_MIN)).clamp(0.0, 1.0);
    T_SUPPLY_MIN + (t_max - T_SUPPLY_MIN) * share
}

/// Hourly COP of an air source heat pump, capped at `COP_MAX`.
pub fn cop_series(temperature: &[Real], radiator: bool) -> Vec<Real> {
    temperature
        .iter()
        .map(|&t| {
            let t_sup = supply_temperature(t, radiator);
            let lift = t_sup - t;
            if lift <= 0.0 {
                COP_MAX
            } else {
                (COP_QUALITY_GRADE * (273.15 + t_sup) / lift).min(COP_MAX)
            }
        })
        .collect()
}

impl Scenario for PvHeatpumpScenario {
    fn name(&self) -> &'static str {
        "PV_Heatpump"
    }

    fn needed_parameters(&self) -> NeededParameters {
        basic_parameters()
            .with("General", &["pv_feedin_tariff"])
            .with("PV", &["lifetime", "capex", "opex_fix", "co2_emissions"])
            .with("HP", &["lifetime", "capex", "co2_emissions"])
    }

    fn add_technology(
        &self,
        ctx: &mut TechnologyContext<'_>,
        parameters: &ParameterSet,
    ) -> ScenarioResult<()> {
        let name = ctx.name().to_string();
        let thermal_bus = ctx.thermal_bus;
        let cop = cop_series(&ctx.profile(TEMPERATURE_PROFILE)?, ctx.demand.contains_radiator());
        let pv_yield = ctx.profile(PV_PROFILE)?;
        let max_pv = ctx.demand.max_pv_size();

        let el = ctx.builder.add_bus(
            Label::bus(format!("b_{name}_el"))
                .belongs_to(name.as_str())
                .tag(TAG_ELECTRICITY),
            true,
        );
        let grid = ctx.builder.bus_or_insert(
            Label::bus("b_el_net")
                .tag(TAG_PRIMARY_SOURCE)
                .tag(TAG_GRID)
                .tag(TAG_ELECTRICITY),
            false,
        );

        ctx.builder.add_converter(
            Label::converter(format!("{name}_heat_pump"))
                .belongs_to(name.as_str())
                .tag(TAG_HEAT_PUMP),
            (
                el,
                Flow::new()
                    .investment(investment(parameters, "HP", 0.0)?)
                    .co2_emissions(parameters.number("HP", "co2_emissions")?),
            ),
            vec![(thermal_bus, Flow::new(), Series::Hourly(cop))],
        );

        let pv_invest = investment(parameters, "PV", parameters.number("PV", "opex_fix")?)?
            .maximum(max_pv);
        let pv = ctx.builder.add_source(
            Label::source(format!("{name}_pv"))
                .belongs_to(name.as_str())
                .tag(TAG_PV),
        );
        ctx.builder.connect(
            pv,
            el,
            Flow::new()
                .fixed_invest(pv_yield, pv_invest)
                .co2_emissions(parameters.number("PV", "co2_emissions")?),
        );

        ctx.builder.add_converter(
            Label::converter(format!("transformer_net_to_{name}_el"))
                .belongs_to(name.as_str())
                .tag(TAG_GRID_SUPPLY),
            (
                grid,
                Flow::new().variable_costs(parameters.number("General", "net_costs")?),
            ),
            vec![(el, Flow::new(), Series::Scalar(1.0))],
        );
        ctx.builder.add_converter(
            Label::converter(format!("transformer_from_{name}_el"))
                .belongs_to(name.as_str())
                .tag(TAG_FEED_IN),
            (
                el,
                Flow::new().variable_costs(-parameters.number("General", "pv_feedin_tariff")?),
            ),
            vec![(grid, Flow::new(), Series::Scalar(1.0))],
        );
        Ok(())
    }

    fn categories(&self) -> &'static [(&'static str, &'static str)] {
        &[
            (TAG_FEED_IN, "Feed-in"),
            (TAG_GRID_SUPPLY, "Grid electricity"),
            (TAG_PV, "PV"),
            (TAG_DEMAND, "Heat demand"),
            (TAG_EXCESS, "Excess heat"),
            (TAG_HEAT_PUMP, "Heat pump"),
        ]
    }

    fn primary_factors(&self) -> &'static [(&'static str, Real)] {
        &[(TAG_ELECTRICITY, PF_ELECTRICITY)]
    }

    fn export_credit(&self) -> Option<Real> {
        Some(PF_DISPLACEMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn supply_temperature_is_clamped() {
        assert_eq!(supply_temperature(25.0, true), T_SUPPLY_MIN);
        assert_eq!(supply_temperature(-20.0, true), T_SUPPLY_MAX_RADIATOR);
        assert_eq!(supply_temperature(-20.0, false), T_SUPPLY_MAX_FLOOR);
        let mid = supply_temperature(3.0, true);
        assert!((mid - 37.5).abs() < 1e-12);
    }

    #[test]
    fn floor_heating_has_better_cop() {
        let temps = [-10.0, 0.0, 10.0];
        let floor = cop_series(&temps, false);
        let radiator = cop_series(&temps, true);
        for (f, r) in floor.iter().zip(&radiator) {
            assert!(f >= r);
        }
        // no lift outside the heating period
        assert_eq!(cop_series(&[22.0], true), vec![COP_MAX]);
    }

    proptest! {
        #[test]
        fn cop_stays_in_range(t in -30.0f64..40.0, radiator: bool) {
            let cop = cop_series(&[t], radiator)[0];
            prop_assert!(cop > 0.0 && cop <= COP_MAX);
        }
    }
}
