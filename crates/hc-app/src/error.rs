//! Error types for the hc-app service layer.

use std::path::PathBuf;

/// Application error wrapping the backend crates' errors for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parameter error: {0}")]
    Parameters(String),

    #[error("Demand error: {0}")]
    Demand(String),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("Could not dispatch simulation job: {0}")]
    Dispatch(String),

    #[error("Unknown job {0}")]
    UnknownJob(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<hc_params::ParamError> for AppError {
    fn from(err: hc_params::ParamError) -> Self {
        AppError::Parameters(err.to_string())
    }
}

impl From<hc_demand::DemandError> for AppError {
    fn from(err: hc_demand::DemandError) -> Self {
        AppError::Demand(err.to_string())
    }
}

impl From<hc_scenarios::ScenarioError> for AppError {
    fn from(err: hc_scenarios::ScenarioError) -> Self {
        AppError::Scenario(err.to_string())
    }
}

impl From<hc_solver::SolverError> for AppError {
    fn from(err: hc_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<hc_results::ResultsError> for AppError {
    fn from(err: hc_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}

impl From<hc_analysis::AnalysisError> for AppError {
    fn from(err: hc_analysis::AnalysisError) -> Self {
        AppError::Analysis(err.to_string())
    }
}
