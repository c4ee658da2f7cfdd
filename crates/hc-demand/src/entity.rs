//! Demand entity capability and the two concrete kinds.

use core::fmt;
use core::str::FromStr;

use hc_core::Real;
use serde::{Deserialize, Serialize};

use crate::district::District;
use crate::household::Household;
use crate::profiles::ProfileLibrary;
use crate::{DemandError, DemandResult};

/// What the energy-system builders need to know about a demand.
///
/// Profiles are hourly over a full year; callers truncate to the
/// simulation horizon.
pub trait DemandEntity {
    fn name(&self) -> &str;

    fn annual_heat_demand(&self, profiles: &ProfileLibrary) -> DemandResult<Vec<Real>>;

    fn annual_hot_water_demand(&self, profiles: &ProfileLibrary) -> DemandResult<Vec<Real>>;

    fn annual_total_demand(&self, profiles: &ProfileLibrary) -> DemandResult<Vec<Real>> {
        let heat = self.annual_heat_demand(profiles)?;
        let hot_water = self.annual_hot_water_demand(profiles)?;
        Ok(heat.iter().zip(&hot_water).map(|(h, w)| h + w).collect())
    }

    /// Installable PV capacity in kW.
    fn max_pv_size(&self) -> Real;

    fn contains_radiator(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandType {
    Single,
    District,
}

impl DemandType {
    /// Suffix used for demand-specific parameter rows.
    pub fn suffix(self) -> &'static str {
        match self {
            DemandType::Single => "single",
            DemandType::District => "district",
        }
    }
}

impl fmt::Display for DemandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemandType::Single => write!(f, "Single"),
            DemandType::District => write!(f, "District"),
        }
    }
}

impl FromStr for DemandType {
    type Err = DemandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(DemandType::Single),
            "district" => Ok(DemandType::District),
            _ => Err(DemandError::UnknownDemandType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Demand {
    Single(Household),
    District(District),
}

impl Demand {
    pub fn demand_type(&self) -> DemandType {
        match self {
            Demand::Single(_) => DemandType::Single,
            Demand::District(_) => DemandType::District,
        }
    }

    fn entity(&self) -> &dyn DemandEntity {
        match self {
            Demand::Single(h) => h,
            Demand::District(d) => d,
        }
    }
}

impl DemandEntity for Demand {
    fn name(&self) -> &str {
        self.entity().name()
    }

    fn annual_heat_demand(&self, profiles: &ProfileLibrary) -> DemandResult<Vec<Real>> {
        self.entity().annual_heat_demand(profiles)
    }

    fn annual_hot_water_demand(&self, profiles: &ProfileLibrary) -> DemandResult<Vec<Real>> {
        self.entity().annual_hot_water_demand(profiles)
    }

    fn max_pv_size(&self) -> Real {
        self.entity().max_pv_size()
    }

    fn contains_radiator(&self) -> bool {
        self.entity().contains_radiator()
    }
}
