//! hc-demand: households, districts and their hourly heat profiles.
//!
//! Provides:
//! - `Household` with bounds checked at entry
//! - `District` aggregating households with integer multiplicities
//! - `DemandEntity`, the capability set the scenario builders consume
//! - `ProfileLibrary` of normalized hourly profiles
//! - `DemandRepository` for `get_demand(type, id)` lookups

pub mod constants;
pub mod district;
pub mod entity;
pub mod household;
pub mod profiles;
pub mod repository;

pub use constants::*;
pub use district::{District, DistrictData, DistrictMember};
pub use entity::{Demand, DemandEntity, DemandType};
pub use household::{HeatType, HotWaterLevel, Household, HouseholdInput, HouseType};
pub use profiles::ProfileLibrary;
pub use repository::{DemandFile, DemandRepository, InMemoryDemandRepository};

pub type DemandResult<T> = Result<T, DemandError>;

#[derive(thiserror::Error, Debug)]
pub enum DemandError {
    #[error("Invalid household '{name}': {field} = {value} exceeds allowed range {min}..={max}")]
    OutOfRange {
        name: String,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid {field} '{name}': must not be empty or contain ', ', '(' or ')'")]
    InvalidName { field: &'static str, name: String },

    #[error("Invalid district '{name}': {message}")]
    InvalidDistrict { name: String, message: String },

    #[error("No demand profile named '{name}'")]
    ProfileNotFound { name: String },

    #[error("Unknown demand type '{0}' (expected 'single' or 'district')")]
    UnknownDemandType(String),

    #[error("{kind} demand with id {id} not found")]
    NotFound { kind: DemandType, id: u32 },

    #[error(transparent)]
    Core(#[from] hc_core::HcError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
