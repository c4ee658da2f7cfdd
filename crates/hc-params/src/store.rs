//! File-backed reference parameter store.

use std::path::Path;

use hc_demand::DemandType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::descriptor::DescriptorTable;
use crate::set::ParameterSet;
use crate::value::{ParameterValue, RawScalar, ValueType};
use crate::{ParamError, ParamResult};

/// One reference value as written in the parameter file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub value: RawScalar,
    #[serde(default)]
    pub unit: Option<String>,
    /// Inferred from the scalar when absent.
    #[serde(default)]
    pub value_type: Option<ValueType>,
    #[serde(default)]
    pub parameter_type: Option<String>,
}

type ComponentTable = IndexMap<String, IndexMap<String, ReferenceEntry>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterFile {
    #[serde(default)]
    pub descriptors: DescriptorTable,
    /// Keyed by `Scenario` or `Scenario_<demand suffix>`.
    pub scenarios: IndexMap<String, ComponentTable>,
}

#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    file: ParameterFile,
}

impl ParameterStore {
    pub fn new(file: ParameterFile) -> Self {
        Self { file }
    }

    pub fn from_yaml_str(content: &str) -> ParamResult<Self> {
        Ok(Self::new(serde_yaml::from_str(content)?))
    }

    pub fn load(path: &Path) -> ParamResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let file = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        Ok(Self::new(file))
    }

    pub fn scenario_keys(&self) -> impl Iterator<Item = &str> {
        self.file.scenarios.keys().map(String::as_str)
    }

    /// Reference parameters of a scenario, preferring demand-specific rows.
    pub fn get_scenario_parameters(
        &self,
        scenario: &str,
        demand_type: DemandType,
    ) -> ParamResult<ParameterSet> {
        let suffixed = format!("{scenario}_{}", demand_type.suffix());
        let table = match self.file.scenarios.get(&suffixed) {
            Some(table) if !table.is_empty() => table,
            _ => {
                debug!(scenario, key = %suffixed, "no demand-specific parameters, using bare key");
                self.file
                    .scenarios
                    .get(scenario)
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| ParamError::ScenarioNotFound {
                        scenario: scenario.to_string(),
                        suffix: demand_type.suffix().to_string(),
                    })?
            }
        };

        let mut set = ParameterSet::new();
        for (component, params) in table {
            for (parameter, entry) in params {
                let mut value = ParameterValue::new(
                    entry.value.to_string(),
                    entry.value_type.unwrap_or_else(|| entry.value.value_type()),
                );
                value.unit = entry.unit.clone();
                value.parameter_type = entry.parameter_type.clone().unwrap_or_default();
                self.file.descriptors.annotate(component, parameter, &mut value);
                set.insert(component.as_str(), parameter.as_str(), value);
            }
        }
        Ok(set)
    }
}
