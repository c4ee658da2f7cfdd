//! Parameter sets and their canonical value-only projection.

use std::collections::BTreeMap;

use hc_core::Real;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::{ParameterValue, ValueType};
use crate::{ParamError, ParamResult};

/// Component-grouped parameters in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    components: IndexMap<String, IndexMap<String, ParameterValue>>,
}

/// Field-wise override of a single parameter. Absent fields keep their
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterPatch {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub value_type: Option<ValueType>,
    #[serde(default)]
    pub parameter_type: Option<String>,
}

impl ParameterPatch {
    pub fn value(value: impl ToString) -> Self {
        Self {
            value: Some(value.to_string()),
            ..Self::default()
        }
    }
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        component: impl Into<String>,
        parameter: impl Into<String>,
        value: ParameterValue,
    ) {
        self.components
            .entry(component.into())
            .or_default()
            .insert(parameter.into(), value);
    }

    pub fn get(&self, component: &str, parameter: &str) -> Option<&ParameterValue> {
        self.components.get(component)?.get(parameter)
    }

    pub fn contains_component(&self, component: &str) -> bool {
        self.components.contains_key(component)
    }

    pub fn components(&self) -> impl Iterator<Item = (&str, &IndexMap<String, ParameterValue>)> {
        self.components.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.components.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn require(&self, component: &str, parameter: &str) -> ParamResult<&ParameterValue> {
        self.get(component, parameter)
            .ok_or_else(|| ParamError::MissingParameters {
                missing: vec![format!("{component}.{parameter}")],
            })
    }

    pub fn number(&self, component: &str, parameter: &str) -> ParamResult<Real> {
        let value = self.require(component, parameter)?;
        value
            .parse_number()
            .ok_or_else(|| value.invalid(component, parameter, "number"))
    }

    pub fn flag(&self, component: &str, parameter: &str) -> ParamResult<bool> {
        let value = self.require(component, parameter)?;
        value
            .parse_flag()
            .ok_or_else(|| value.invalid(component, parameter, "boolean"))
    }

    pub fn text(&self, component: &str, parameter: &str) -> ParamResult<&str> {
        Ok(self.require(component, parameter)?.value.as_str())
    }

    /// Merge one override; creates the entry when it does not exist yet.
    pub fn apply_patch(&mut self, component: &str, parameter: &str, patch: &ParameterPatch) {
        let entry = self
            .components
            .entry(component.to_string())
            .or_default()
            .entry(parameter.to_string())
            .or_insert_with(|| ParameterValue::new(String::new(), ValueType::Float));
        if let Some(value) = &patch.value {
            entry.value = value.clone();
        }
        if let Some(unit) = &patch.unit {
            entry.unit = Some(unit.clone());
        }
        if let Some(value_type) = patch.value_type {
            entry.value_type = value_type;
        }
        if let Some(parameter_type) = &patch.parameter_type {
            entry.parameter_type = parameter_type.clone();
        }
    }

    /// Merge a batch of overrides; later entries win per field.
    pub fn merge(&mut self, overrides: &IndexMap<String, IndexMap<String, ParameterPatch>>) {
        for (component, params) in overrides {
            for (parameter, patch) in params {
                self.apply_patch(component, parameter, patch);
            }
        }
    }

    pub fn set_value(&mut self, component: &str, parameter: &str, value: impl ToString) {
        self.apply_patch(component, parameter, &ParameterPatch::value(value));
    }

    pub fn to_simulation_parameters(&self) -> ParamResult<SimulationParameters> {
        let mut values = BTreeMap::new();
        for (component, params) in &self.components {
            let mut typed = BTreeMap::new();
            for (parameter, value) in params {
                typed.insert(parameter.clone(), value.to_json(component, parameter)?);
            }
            values.insert(component.clone(), typed);
        }
        Ok(SimulationParameters(values))
    }
}

/// Value-only view of a parameter set with sorted keys.
///
/// This is the cache key of a simulation record and the payload handed to
/// the worker, so equality is exact and independent of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationParameters(pub BTreeMap<String, BTreeMap<String, serde_json::Value>>);

impl SimulationParameters {
    pub fn canonical_json(&self) -> ParamResult<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    pub fn get(&self, component: &str, parameter: &str) -> Option<&serde_json::Value> {
        self.0.get(component)?.get(parameter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParameterSet {
        let mut set = ParameterSet::new();
        set.insert("General", "wacc", ParameterValue::float(3.0).with_unit("%"));
        set.insert("Gas", "efficiency", ParameterValue::float(95.0).with_unit("%"));
        set
    }

    #[test]
    fn typed_getters() {
        let set = sample();
        assert_eq!(set.number("General", "wacc").unwrap(), 3.0);
        assert!(matches!(
            set.number("General", "net_costs"),
            Err(ParamError::MissingParameters { .. })
        ));
    }

    #[test]
    fn patch_replaces_only_given_fields() {
        let mut set = sample();
        set.apply_patch("Gas", "efficiency", &ParameterPatch::value(90));
        let v = set.get("Gas", "efficiency").unwrap();
        assert_eq!(v.value, "90");
        assert_eq!(v.unit.as_deref(), Some("%"));
    }

    #[test]
    fn later_override_wins() {
        let mut set = sample();
        let mut overrides: IndexMap<String, IndexMap<String, ParameterPatch>> = IndexMap::new();
        overrides
            .entry("General".into())
            .or_default()
            .insert("wacc".into(), ParameterPatch::value(4));
        set.merge(&overrides);
        overrides["General"].insert("wacc".into(), ParameterPatch::value(5));
        set.merge(&overrides);
        assert_eq!(set.number("General", "wacc").unwrap(), 5.0);
    }

    #[test]
    fn projection_ignores_insertion_order() {
        let a = sample();
        let mut b = ParameterSet::new();
        b.insert("Gas", "efficiency", ParameterValue::float(95.0));
        b.insert("General", "wacc", ParameterValue::float(3.0));
        assert_eq!(
            a.to_simulation_parameters().unwrap(),
            b.to_simulation_parameters().unwrap()
        );
        assert_eq!(
            a.to_simulation_parameters().unwrap().canonical_json().unwrap(),
            r#"{"Gas":{"efficiency":95.0},"General":{"wacc":3.0}}"#
        );
    }
}
