#![allow(dead_code)]

use hc_demand::{HeatType, HotWaterLevel, HouseType, Household, HouseholdInput};
use hc_params::{ParameterSet, ParameterValue, ValueType};

pub fn household(name: &str, persons: u32, heat_type: HeatType) -> Household {
    Household::new(HouseholdInput {
        name: name.to_string(),
        house_type: HouseType::Efh,
        persons,
        area: 150.0,
        heat_type,
        warm_water_per_day: HotWaterLevel::Medium.liters(),
        heat_demand: None,
    })
    .unwrap()
}

/// Reference values for every scenario in one set.
pub fn parameters() -> ParameterSet {
    let mut set = ParameterSet::new();
    let mut add = |component: &str, values: &[(&str, f64)]| {
        for (name, value) in values {
            set.insert(component, *name, ParameterValue::float(*value));
        }
    };
    add(
        "General",
        &[
            ("wacc", 3.0),
            ("net_costs", 0.28),
            ("gas_price", 0.07),
            ("gas_rate", 2.0),
            ("oil_price", 0.08),
            ("oil_rate", 2.0),
            ("woodchip_price", 0.04),
            ("bhkw_feedin_tariff", 0.08),
            ("pv_feedin_tariff", 0.12),
        ],
    );
    let boiler = |efficiency: f64, co2: f64, capex: f64| {
        [
            ("lifetime", 20.0),
            ("capex", capex),
            ("opex", 0.002),
            ("efficiency", efficiency),
            ("co2_emissions", co2),
        ]
    };
    add("Gas", &boiler(95.0, 202.0, 300.0));
    add("Oil", &boiler(90.0, 266.0, 400.0));
    add("Woodchip", &boiler(85.0, 23.0, 800.0));
    let chp = |co2: f64| {
        [
            ("capex", 3000.0),
            ("lifetime", 15.0),
            ("conversion_factor_el", 30.0),
            ("conversion_factor_th", 55.0),
            ("co2_emissions", co2),
            ("minimal_load", 20.0),
        ]
    };
    add("BHKW", &chp(202.0));
    add("BIO_BHKW", &chp(40.0));
    add(
        "PV",
        &[
            ("lifetime", 25.0),
            ("capex", 1400.0),
            ("opex_fix", 20.0),
            ("co2_emissions", 50.0),
        ],
    );
    add(
        "HP",
        &[("lifetime", 20.0), ("capex", 1200.0), ("co2_emissions", 0.0)],
    );
    set.insert("demand", "index", ParameterValue::new("1", ValueType::Integer));
    set.insert("demand", "type", ParameterValue::new("single", ValueType::String));
    set
}
