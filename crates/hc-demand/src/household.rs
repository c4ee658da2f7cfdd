//! Single household demand.

use hc_core::{is_valid_node_name, Real};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::entity::DemandEntity;
use crate::profiles::ProfileLibrary;
use crate::{DemandError, DemandResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HouseType {
    /// Single-family house.
    #[serde(rename = "EFH")]
    Efh,
    /// Multi-family house.
    #[serde(rename = "MFH")]
    Mfh,
}

impl HouseType {
    /// Specific yearly heat demand (kWh/m²a).
    pub fn energy_per_qm(self) -> Real {
        match self {
            HouseType::Efh => 90.0,
            HouseType::Mfh => 70.0,
        }
    }

    /// Fraction of the living area that ends up as roof area.
    pub fn roof_fraction(self) -> Real {
        match self {
            HouseType::Efh => 0.5,
            HouseType::Mfh => 0.25,
        }
    }

    pub fn heat_profile(self) -> &'static str {
        match self {
            HouseType::Efh => HEAT_PROFILE_EFH,
            HouseType::Mfh => HEAT_PROFILE_MFH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatType {
    Radiator,
    Floor,
}

/// Daily hot-water consumption per person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotWaterLevel {
    Low,
    Medium,
    High,
}

impl HotWaterLevel {
    pub fn liters(self) -> Real {
        match self {
            HotWaterLevel::Low => 43.0,
            HotWaterLevel::Medium => 66.0,
            HotWaterLevel::High => 109.0,
        }
    }
}

/// User-entered household data before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdInput {
    pub name: String,
    pub house_type: HouseType,
    pub persons: u32,
    /// Living area in m².
    pub area: Real,
    pub heat_type: HeatType,
    /// Hot water per person and day in liters.
    pub warm_water_per_day: Real,
    /// Yearly heat demand in kWh; estimated from persons when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_demand: Option<Real>,
}

/// A validated household. Construct through [`Household::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HouseholdInput", into = "HouseholdInput")]
pub struct Household {
    name: String,
    house_type: HouseType,
    persons: u32,
    area: Real,
    heat_type: HeatType,
    warm_water_per_day: Real,
    heat_demand: Real,
    explicit_demand: bool,
}

/// Names end up in node labels and edge keys.
pub(crate) fn check_name(field: &'static str, name: &str) -> DemandResult<()> {
    if is_valid_node_name(name) {
        Ok(())
    } else {
        Err(DemandError::InvalidName {
            field,
            name: name.to_string(),
        })
    }
}

fn check_range(
    name: &str,
    field: &'static str,
    value: Real,
    min: Real,
    max: Real,
) -> DemandResult<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(DemandError::OutOfRange {
            name: name.to_string(),
            field,
            value,
            min,
            max,
        })
    }
}

impl Household {
    pub fn new(input: HouseholdInput) -> DemandResult<Self> {
        let name = input.name;
        check_name("household name", &name)?;
        check_range(&name, "persons", input.persons as Real, 1.0, MAX_PERSONS as Real)?;
        check_range(&name, "area", input.area, Real::MIN_POSITIVE, MAX_AREA)?;
        check_range(&name, "warm_water_per_day", input.warm_water_per_day, 0.0, 1000.0)?;

        let (heat_demand, explicit_demand) = match input.heat_demand {
            Some(demand) => (demand, true),
            None => (
                input.persons as Real * QM_PER_PERSON * input.house_type.energy_per_qm(),
                false,
            ),
        };
        check_range(&name, "heat_demand", heat_demand, 0.0, MAX_HEAT_DEMAND)?;

        Ok(Self {
            name,
            house_type: input.house_type,
            persons: input.persons,
            area: input.area,
            heat_type: input.heat_type,
            warm_water_per_day: input.warm_water_per_day,
            heat_demand,
            explicit_demand,
        })
    }

    pub fn house_type(&self) -> HouseType {
        self.house_type
    }

    pub fn persons(&self) -> u32 {
        self.persons
    }

    pub fn area(&self) -> Real {
        self.area
    }

    pub fn heat_type(&self) -> HeatType {
        self.heat_type
    }

    /// Yearly heat demand in kWh.
    pub fn heat_demand(&self) -> Real {
        self.heat_demand
    }

    /// Yearly hot-water energy in kWh.
    pub fn hot_water_energy(&self) -> Real {
        self.persons as Real * self.warm_water_per_day * 365.0 * ENERGY_PER_LITER
    }
}

impl TryFrom<HouseholdInput> for Household {
    type Error = DemandError;

    fn try_from(input: HouseholdInput) -> Result<Self, Self::Error> {
        Household::new(input)
    }
}

impl From<Household> for HouseholdInput {
    fn from(h: Household) -> Self {
        HouseholdInput {
            name: h.name,
            house_type: h.house_type,
            persons: h.persons,
            area: h.area,
            heat_type: h.heat_type,
            warm_water_per_day: h.warm_water_per_day,
            heat_demand: h.explicit_demand.then_some(h.heat_demand),
        }
    }
}

impl DemandEntity for Household {
    fn name(&self) -> &str {
        &self.name
    }

    fn annual_heat_demand(&self, profiles: &ProfileLibrary) -> DemandResult<Vec<Real>> {
        let profile = profiles.get(self.house_type.heat_profile())?;
        Ok(profile.iter().map(|share| share * self.heat_demand).collect())
    }

    fn annual_hot_water_demand(&self, profiles: &ProfileLibrary) -> DemandResult<Vec<Real>> {
        let profile = profiles.get(HOT_WATER_PROFILE)?;
        let energy = self.hot_water_energy();
        Ok(profile.iter().map(|share| share * energy).collect())
    }

    fn max_pv_size(&self) -> Real {
        let roof = self.area * self.house_type.roof_fraction() * PV_ROOF_SHARE;
        roof / QM_PER_PV_KW
    }

    fn contains_radiator(&self) -> bool {
        self.heat_type == HeatType::Radiator
    }
}
