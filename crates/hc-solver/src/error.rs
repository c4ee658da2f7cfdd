//! Error types for solver operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("No valid solution: the model is infeasible")]
    Infeasible,

    #[error("No valid solution: the model is unbounded")]
    Unbounded,

    #[error("Model setup error: {what}")]
    ModelSetup { what: String },

    #[error("Solver backend '{backend}' failed: {message}")]
    Backend { backend: String, message: String },
}

pub type SolverResult<T> = Result<T, SolverError>;
