//! Declared parameter requirements of a scenario.

use indexmap::IndexMap;
use serde::Serialize;

use crate::set::ParameterSet;
use crate::{ParamError, ParamResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NeededParameters(IndexMap<String, Vec<String>>);

impl NeededParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add requirements for a component, keeping earlier entries.
    pub fn with(mut self, component: &str, parameters: &[&str]) -> Self {
        let entry = self.0.entry(component.to_string()).or_default();
        for p in parameters {
            if !entry.iter().any(|e| e == p) {
                entry.push((*p).to_string());
            }
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(c, ps)| (c.as_str(), ps.as_slice()))
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Fail with every missing `component.parameter` at once.
    pub fn check(&self, parameters: &ParameterSet) -> ParamResult<()> {
        let mut missing = Vec::new();
        for (component, needed) in &self.0 {
            for parameter in needed {
                if parameters.get(component, parameter).is_none() {
                    missing.push(format!("{component}.{parameter}"));
                }
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ParamError::MissingParameters { missing })
        }
    }
}
