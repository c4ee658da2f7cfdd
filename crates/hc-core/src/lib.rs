//! hc-core: shared foundation for the heating comparison engine.
//!
//! Contains:
//! - ids (compact ids for graph objects)
//! - edge (stable string edge keys that survive serialization)
//! - numeric (Real + tolerances + float helpers)
//! - economics (annuity, escalated average price)
//! - time (hourly simulation time index)
//! - error (shared error types)

pub mod economics;
pub mod edge;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod time;

pub use economics::{annuity, average_cost_per_year};
pub use edge::{is_valid_node_name, EdgeKey, EDGE_SEPARATOR};
pub use error::{HcError, HcResult};
pub use ids::*;
pub use numeric::*;
pub use time::{TimeIndex, DEFAULT_PERIODS};
