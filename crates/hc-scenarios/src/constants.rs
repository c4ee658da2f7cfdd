//! Tags, factors and fixed coefficients shared by the scenarios.

use hc_core::Real;

// Node tags
pub const TAG_DEMAND: &str = "demand";
pub const TAG_EXCESS: &str = "excess";
pub const TAG_HEAT: &str = "heat";
/// Bus that supplies an energy carrier from outside the system.
pub const TAG_PRIMARY_SOURCE: &str = "primary_source";
pub const TAG_GRID: &str = "grid";
pub const TAG_ELECTRICITY: &str = "electricity";
pub const TAG_GAS: &str = "gas";
pub const TAG_OIL: &str = "oil";
pub const TAG_WOODCHIP: &str = "woodchip";
pub const TAG_BIOGAS: &str = "biogas";
pub const TAG_BHKW: &str = "bhkw";
pub const TAG_FEED_IN: &str = "feed_in";
pub const TAG_GRID_SUPPLY: &str = "grid_supply";
pub const TAG_PV: &str = "pv";
pub const TAG_HEAT_PUMP: &str = "heat_pump";

/// Fallback comparison category for edges no tag matches.
pub const OTHER_LABEL: &str = "Other";

// Primary energy factors
pub const PF_GAS: Real = 1.1;
pub const PF_OIL: Real = 1.1;
pub const PF_BIOGAS: Real = 0.5;
pub const PF_WOOD: Real = 0.2;
pub const PF_ELECTRICITY: Real = 2.4;
/// Credit for electricity fed into the grid.
pub const PF_DISPLACEMENT: Real = 2.8;

/// CHP size relative to the peak heat load.
pub const BHKW_SIZE_PEAK_FACTOR: Real = 3.33;
/// CO2 credit of CHP electricity in g/kWh.
pub const BHKW_ELECTRICITY_CO2: Real = -217.0;

// Heat pump model
pub const COP_MAX: Real = 7.0;
/// Ratio of real to Carnot COP for an air source heat pump.
pub const COP_QUALITY_GRADE: Real = 0.3;
pub const T_HEAT_PERIOD: Real = 20.0;
pub const T_AMB_MIN: Real = -14.0;
pub const T_SUPPLY_MIN: Real = 20.0;
pub const T_SUPPLY_MAX_RADIATOR: Real = 55.0;
pub const T_SUPPLY_MAX_FLOOR: Real = 35.0;
