//! Linear dispatch and sizing model for energy systems.
//!
//! An `EnergySystem` is translated into a backend-neutral `LpModel`
//! (one variable per flow and hour, one per investment, one per storage
//! level), solved by a `SolverBackend`, and unpacked into `RawResults` keyed
//! by string edge identifiers.

pub mod backend;
pub mod error;
pub mod model;
pub mod simulate;

pub use backend::{MinilpBackend, SolveOptions, SolverBackend};
pub use error::{SolverError, SolverResult};
pub use model::{Comparison, LpConstraint, LpModel, LpSolution, VarId};
pub use simulate::{simulate, simulate_with};
