//! A single parameter value with its metadata.

use core::fmt;

use hc_core::Real;
use serde::{Deserialize, Serialize};

use crate::{ParamError, ParamResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Float,
    Integer,
    Boolean,
    String,
}

impl ValueType {
    fn name(self) -> &'static str {
        match self {
            ValueType::Float => "float",
            ValueType::Integer => "integer",
            ValueType::Boolean => "boolean",
            ValueType::String => "string",
        }
    }
}

/// Scalar as written in a parameter file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawScalar {
    pub fn value_type(&self) -> ValueType {
        match self {
            RawScalar::Bool(_) => ValueType::Boolean,
            RawScalar::Int(_) => ValueType::Integer,
            RawScalar::Float(_) => ValueType::Float,
            RawScalar::Text(_) => ValueType::String,
        }
    }
}

impl fmt::Display for RawScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawScalar::Bool(b) => write!(f, "{b}"),
            RawScalar::Int(i) => write!(f, "{i}"),
            RawScalar::Float(x) => write!(f, "{x}"),
            RawScalar::Text(s) => f.write_str(s),
        }
    }
}

/// Values are kept in their textual form and interpreted per `value_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterValue {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub value_type: ValueType,
    #[serde(default)]
    pub parameter_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_size: Option<Real>,
}

impl ParameterValue {
    pub fn new(value: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            value: value.into(),
            unit: None,
            value_type,
            parameter_type: String::new(),
            label: None,
            description: None,
            min: None,
            max: None,
            step_size: None,
        }
    }

    pub fn float(value: Real) -> Self {
        Self::new(value.to_string(), ValueType::Float)
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub(crate) fn parse_number(&self) -> Option<Real> {
        self.value.trim().parse::<Real>().ok().filter(|v| v.is_finite())
    }

    pub(crate) fn parse_flag(&self) -> Option<bool> {
        match self.value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        }
    }

    /// Typed JSON form used for the cache key and the job payload.
    pub fn to_json(&self, component: &str, parameter: &str) -> ParamResult<serde_json::Value> {
        let invalid = || ParamError::InvalidValue {
            component: component.to_string(),
            parameter: parameter.to_string(),
            value: self.value.clone(),
            expected: self.value_type.name(),
        };
        Ok(match self.value_type {
            ValueType::Float => {
                let v = self.parse_number().ok_or_else(invalid)?;
                serde_json::Number::from_f64(v)
                    .map(serde_json::Value::Number)
                    .ok_or_else(invalid)?
            }
            ValueType::Integer => {
                let v: i64 = self.value.trim().parse().map_err(|_| invalid())?;
                serde_json::Value::from(v)
            }
            ValueType::Boolean => serde_json::Value::Bool(self.parse_flag().ok_or_else(invalid)?),
            ValueType::String => serde_json::Value::String(self.value.clone()),
        })
    }

    pub(crate) fn invalid(&self, component: &str, parameter: &str, expected: &'static str) -> ParamError {
        ParamError::InvalidValue {
            component: component.to_string(),
            parameter: parameter.to_string(),
            value: self.value.clone(),
            expected,
        }
    }
}
