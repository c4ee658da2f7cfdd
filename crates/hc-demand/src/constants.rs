//! Reference values for demand estimation.

use hc_core::Real;

/// Heating energy contained in one liter of hot water (kWh/l).
pub const ENERGY_PER_LITER: Real = 0.058;

/// Living area assumed per person when no demand is entered (m²).
pub const QM_PER_PERSON: Real = 44.0;

/// Roof area needed per installed kW of PV (m²/kW).
pub const QM_PER_PV_KW: Real = 7.0;

/// Share of the roof that is usable for PV.
pub const PV_ROOF_SHARE: Real = 0.4;

pub const MAX_HEAT_DEMAND: Real = 5e5;
pub const MAX_AREA: Real = 2000.0;
pub const MAX_PERSONS: u32 = 30;

pub const HEAT_PROFILE_EFH: &str = "heat_efh";
pub const HEAT_PROFILE_MFH: &str = "heat_mfh";
pub const HOT_WATER_PROFILE: &str = "hot_water";
pub const TEMPERATURE_PROFILE: &str = "temperature";
pub const PV_PROFILE: &str = "pv";
