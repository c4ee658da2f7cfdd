//! hc-params: scenario parameter store.
//!
//! Parameters are grouped `component -> parameter -> value`. Reference
//! values come from a file-backed store keyed by scenario (optionally with a
//! demand-type suffix), descriptive metadata is joined from a descriptor
//! table, and user overrides are merged per field.

pub mod descriptor;
pub mod required;
pub mod set;
pub mod store;
pub mod value;

pub use descriptor::{DescriptorTable, ParameterDescriptor};
pub use required::NeededParameters;
pub use set::{ParameterPatch, ParameterSet, SimulationParameters};
pub use store::{ParameterFile, ParameterStore};
pub use value::{ParameterValue, RawScalar, ValueType};

pub type ParamResult<T> = Result<T, ParamError>;

#[derive(thiserror::Error, Debug)]
pub enum ParamError {
    #[error("No parameters found for scenario '{scenario}' (tried '{scenario}_{suffix}' and '{scenario}')")]
    ScenarioNotFound { scenario: String, suffix: String },

    #[error("Missing parameters: {}", .missing.join(", "))]
    MissingParameters { missing: Vec<String> },

    #[error("Parameter {component}.{parameter} = '{value}' is not a valid {expected}")]
    InvalidValue {
        component: String,
        parameter: String,
        value: String,
        expected: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
