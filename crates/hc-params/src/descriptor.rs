//! Descriptive metadata for form rendering.

use hc_core::Real;
use serde::{Deserialize, Serialize};

use crate::value::ParameterValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// `None` applies to the parameter in every component.
    #[serde(default)]
    pub component: Option<String>,
    pub parameter: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub min: Option<Real>,
    #[serde(default)]
    pub max: Option<Real>,
    #[serde(default)]
    pub step_size: Option<Real>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescriptorTable {
    entries: Vec<ParameterDescriptor>,
}

impl DescriptorTable {
    pub fn new(entries: Vec<ParameterDescriptor>) -> Self {
        Self { entries }
    }

    /// Component-specific entry first, then the global one.
    pub fn describe(&self, component: &str, parameter: &str) -> Option<&ParameterDescriptor> {
        self.entries
            .iter()
            .find(|d| d.parameter == parameter && d.component.as_deref() == Some(component))
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|d| d.parameter == parameter && d.component.is_none())
            })
    }

    pub fn annotate(&self, component: &str, parameter: &str, value: &mut ParameterValue) {
        let Some(d) = self.describe(component, parameter) else {
            return;
        };
        value.label = value.label.take().or_else(|| d.label.clone());
        value.description = value.description.take().or_else(|| d.description.clone());
        value.unit = value.unit.take().or_else(|| d.unit.clone());
        value.min = value.min.or(d.min);
        value.max = value.max.or(d.max);
        value.step_size = value.step_size.or(d.step_size);
    }
}
