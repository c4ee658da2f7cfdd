//! hc-graph: energy-system flow graph.
//!
//! Provides:
//! - Node labels with tags for semantic classification
//! - Buses, sources, sinks, converters and storage joined by flows
//! - Incremental builder with validation that freezes into an immutable
//!   `EnergySystem`
//!
//! # Example
//!
//! ```
//! use hc_core::TimeIndex;
//! use hc_graph::{EnergySystemBuilder, Flow, Label, Series};
//!
//! let mut builder = EnergySystemBuilder::new(TimeIndex::hourly(3).unwrap());
//! let gas = builder.add_bus(Label::bus("b_gas"), false);
//! let heat = builder.add_bus(Label::bus("b_heat"), true);
//! let demand = builder.add_sink(Label::sink("demand").tag("demand"));
//! builder.add_converter(
//!     Label::converter("boiler"),
//!     (gas, Flow::new().variable_costs(0.06)),
//!     vec![(heat, Flow::new(), Series::Scalar(0.9))],
//! );
//! builder.connect(heat, demand, Flow::new().fixed(vec![1.0, 2.0, 3.0], 1.0));
//! let system = builder.build().unwrap();
//!
//! assert_eq!(system.nodes().len(), 4);
//! assert_eq!(system.flows().len(), 3);
//! ```

pub mod builder;
pub mod error;
pub mod flow;
pub mod label;
pub mod system;
pub(crate) mod validate;

pub use builder::EnergySystemBuilder;
pub use error::{GraphError, GraphResult};
pub use flow::{Flow, Investment, Series};
pub use label::{Label, NodeType};
pub use system::{EnergySystem, FlowEdge, Node, NodeKind, StorageParams};
