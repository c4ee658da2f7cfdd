//! Application service layer for the heating comparison engine.
//!
//! Ties the lower crates together for the CLI: configuration, the worker
//! job queue, the per-user simulation sessions with their result cache and
//! the comparison of finished simulations.

pub mod comparison;
pub mod config;
pub mod context;
pub mod error;
pub mod jobs;
pub mod session;

pub use comparison::{Comparison, ComparisonService, RankingTable};
pub use config::{AppConfig, ScenarioConfig, SolverConfig, WorkerConfig};
pub use context::AppContext;
pub use error::{AppError, AppResult};
pub use jobs::{run_job, JobHandle, JobQueue, JobStatus, SimulationJob, ThreadJobQueue};
pub use session::{
    check_for_result, FailureReason, Overrides, SessionSimulation, SimulationState, UserSession,
};
