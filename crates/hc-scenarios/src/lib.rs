//! hc-scenarios: technology scenarios and energy-system composition.
//!
//! Every scenario shares the same basic system (one thermal bus, the
//! demand sink and an excess sink per demand entity) and extends it with
//! its own supply wiring:
//! - `Gas`, `Oil`, `Woodchip`: a single fuel boiler
//! - `BHKW`, `BioBHKW`: combined heat and power with electricity feed-in
//!   and a gas peak boiler
//! - `PV_Heatpump`: heat pump fed by rooftop PV and the grid
//!
//! Scenarios also know how to label their edges for reporting and how to
//! account for primary energy.

pub mod basic;
pub mod bhkw;
pub mod boiler;
pub mod constants;
pub mod curves;
pub mod primary;
pub mod pv_heatpump;
pub mod registry;
pub mod scenario;

pub use basic::{basic_parameters, build_energy_system};
pub use bhkw::ChpScenario;
pub use boiler::{BoilerScenario, FuelPrice};
pub use curves::{PowerLaw, SizeCurve};
pub use primary::PrimaryEnergy;
pub use pv_heatpump::{cop_series, supply_temperature, PvHeatpumpScenario};
pub use registry::{ScenarioKind, ScenarioRegistry};
pub use scenario::{Scenario, TechnologyContext};

use hc_core::Real;

pub type ScenarioResult<T> = Result<T, ScenarioError>;

#[derive(thiserror::Error, Debug)]
pub enum ScenarioError {
    #[error("Unknown scenario '{0}'")]
    UnknownScenario(String),

    #[error("No {curve} data for size {size_kw} kW")]
    NoCurveData { curve: &'static str, size_kw: Real },

    #[error(transparent)]
    Param(#[from] hc_params::ParamError),

    #[error(transparent)]
    Graph(#[from] hc_graph::GraphError),

    #[error(transparent)]
    Demand(#[from] hc_demand::DemandError),

    #[error(transparent)]
    Core(#[from] hc_core::HcError),
}
