//! hc-results: raw solver results and the simulation cache index.

pub mod hash;
pub mod store;
pub mod types;

pub use hash::parameter_hash;
pub use store::ResultStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Result not found: {result_id}")]
    ResultNotFound { result_id: ResultId },

    #[error("Could not allocate a result id after {attempts} attempts")]
    IdExhausted { attempts: u32 },
}
