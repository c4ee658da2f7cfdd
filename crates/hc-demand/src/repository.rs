//! Demand lookup by type and id.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::district::{District, DistrictMember};
use crate::entity::{Demand, DemandType};
use crate::household::Household;
use crate::{DemandError, DemandResult};

pub trait DemandRepository: Send + Sync {
    fn get_demand(&self, kind: DemandType, id: u32) -> DemandResult<Demand>;
}

/// District member referencing a household by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictMemberRef {
    pub household: u32,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictDef {
    pub name: String,
    pub members: Vec<DistrictMemberRef>,
}

/// On-disk layout of a demand file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandFile {
    #[serde(default)]
    pub households: BTreeMap<u32, Household>,
    #[serde(default)]
    pub districts: BTreeMap<u32, DistrictDef>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryDemandRepository {
    households: BTreeMap<u32, Household>,
    districts: BTreeMap<u32, District>,
}

impl InMemoryDemandRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_household(&mut self, id: u32, household: Household) {
        self.households.insert(id, household);
    }

    pub fn insert_district(&mut self, id: u32, district: District) {
        self.districts.insert(id, district);
    }

    pub fn from_file(file: DemandFile) -> DemandResult<Self> {
        let mut repo = Self::new();
        for (id, def) in &file.districts {
            let mut members = Vec::with_capacity(def.members.len());
            for m in &def.members {
                let household = file.households.get(&m.household).cloned().ok_or_else(|| {
                    DemandError::InvalidDistrict {
                        name: def.name.clone(),
                        message: format!("unknown household id {}", m.household),
                    }
                })?;
                members.push(DistrictMember {
                    household,
                    amount: m.amount,
                });
            }
            repo.insert_district(*id, District::new(def.name.clone(), members)?);
        }
        repo.households = file.households;
        Ok(repo)
    }

    pub fn load(path: &Path) -> DemandResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: DemandFile = serde_yaml::from_str(&content)?;
        Self::from_file(file)
    }
}

impl DemandRepository for InMemoryDemandRepository {
    fn get_demand(&self, kind: DemandType, id: u32) -> DemandResult<Demand> {
        let found = match kind {
            DemandType::Single => self.households.get(&id).cloned().map(Demand::Single),
            DemandType::District => self.districts.get(&id).cloned().map(Demand::District),
        };
        found.ok_or(DemandError::NotFound { kind, id })
    }
}
