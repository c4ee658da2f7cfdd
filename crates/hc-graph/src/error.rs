//! Graph-specific error types.

use hc_core::NodeId;

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph construction and validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Two nodes share a name.
    DuplicateName { name: String },

    /// A node name cannot be used in an edge key.
    InvalidName { name: String },

    /// A flow refers to a node that doesn't exist.
    InvalidNodeRef { node: NodeId },

    /// No node with the requested name.
    NameNotFound { name: String },

    /// An hourly series does not match the time index.
    SeriesLength {
        what: String,
        len: usize,
        periods: usize,
    },

    /// A node has a flow in a direction its kind does not allow.
    InvalidConnection { node: String, reason: &'static str },

    /// A converter output lacks a conversion factor, or the factor is unusable.
    InvalidConversion { converter: String, output: String },

    /// A flow attribute is out of its valid range.
    InvalidFlow { edge: String, reason: String },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicateName { name } => {
                write!(f, "Node name '{}' is used more than once", name)
            }
            GraphError::InvalidName { name } => {
                write!(f, "Node name '{}' must not be empty or contain ', ', '(' or ')'", name)
            }
            GraphError::InvalidNodeRef { node } => {
                write!(f, "Flow refers to non-existent node {}", node)
            }
            GraphError::NameNotFound { name } => {
                write!(f, "Could not find node '{}' in energy system", name)
            }
            GraphError::SeriesLength { what, len, periods } => {
                write!(
                    f,
                    "Series {} has {} values but the time index has {} periods",
                    what, len, periods
                )
            }
            GraphError::InvalidConnection { node, reason } => {
                write!(f, "Invalid connection at '{}': {}", node, reason)
            }
            GraphError::InvalidConversion { converter, output } => {
                write!(
                    f,
                    "Converter '{}' has no valid conversion factor towards '{}'",
                    converter, output
                )
            }
            GraphError::InvalidFlow { edge, reason } => {
                write!(f, "Flow {} is invalid: {}", edge, reason)
            }
        }
    }
}

impl std::error::Error for GraphError {}
