//! District: households combined with integer multiplicities.

use hc_core::Real;
use serde::{Deserialize, Serialize};

use crate::entity::DemandEntity;
use crate::household::{check_name, Household};
use crate::profiles::ProfileLibrary;
use crate::{DemandError, DemandResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictMember {
    pub household: Household,
    pub amount: u32,
}

/// Wire form of a district, validated into [`District`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictData {
    pub name: String,
    pub members: Vec<DistrictMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DistrictData", into = "DistrictData")]
pub struct District {
    name: String,
    members: Vec<DistrictMember>,
}

impl District {
    pub fn new(name: impl Into<String>, members: Vec<DistrictMember>) -> DemandResult<Self> {
        let name = name.into();
        check_name("district name", &name)?;
        if members.is_empty() {
            return Err(DemandError::InvalidDistrict {
                name,
                message: "a district needs at least one household".to_string(),
            });
        }
        if let Some(m) = members.iter().find(|m| m.amount == 0) {
            return Err(DemandError::InvalidDistrict {
                message: format!("household '{}' has amount 0", m.household.name()),
                name,
            });
        }
        Ok(Self { name, members })
    }

    pub fn members(&self) -> &[DistrictMember] {
        &self.members
    }

    fn weighted_sum<F>(&self, profiles: &ProfileLibrary, series: F) -> DemandResult<Vec<Real>>
    where
        F: Fn(&Household, &ProfileLibrary) -> DemandResult<Vec<Real>>,
    {
        let mut total: Vec<Real> = Vec::new();
        for member in &self.members {
            let values = series(&member.household, profiles)?;
            if total.is_empty() {
                total = vec![0.0; values.len()];
            }
            let amount = member.amount as Real;
            for (acc, v) in total.iter_mut().zip(&values) {
                *acc += amount * v;
            }
        }
        Ok(total)
    }
}

impl TryFrom<DistrictData> for District {
    type Error = DemandError;

    fn try_from(data: DistrictData) -> Result<Self, Self::Error> {
        District::new(data.name, data.members)
    }
}

impl From<District> for DistrictData {
    fn from(d: District) -> Self {
        DistrictData {
            name: d.name,
            members: d.members,
        }
    }
}

impl DemandEntity for District {
    fn name(&self) -> &str {
        &self.name
    }

    fn annual_heat_demand(&self, profiles: &ProfileLibrary) -> DemandResult<Vec<Real>> {
        self.weighted_sum(profiles, |h, p| h.annual_heat_demand(p))
    }

    fn annual_hot_water_demand(&self, profiles: &ProfileLibrary) -> DemandResult<Vec<Real>> {
        self.weighted_sum(profiles, |h, p| h.annual_hot_water_demand(p))
    }

    fn max_pv_size(&self) -> Real {
        self.members
            .iter()
            .map(|m| m.amount as Real * m.household.max_pv_size())
            .sum()
    }

    fn contains_radiator(&self) -> bool {
        self.members.iter().any(|m| m.household.contains_radiator())
    }
}
