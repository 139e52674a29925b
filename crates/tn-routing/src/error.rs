//! Error types for routing operations.

use thiserror::Error;
use tn_core::{Cost, TnError};
use tn_graph::{ErrorKind, GraphError};

/// Errors raised at the routing boundary.
///
/// Unreachable nodes are not errors; they come back as missing costs in
/// [`ShortestPaths`](crate::ShortestPaths).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Source index {index} out of bounds for {len} nodes")]
    SourceOutOfBounds { index: usize, len: usize },

    #[error("Invalid cost {value} at ({row}, {col})")]
    InvalidCost { row: usize, col: usize, value: Cost },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Numeric error: {0}")]
    Numeric(#[from] TnError),
}

pub type RoutingResult<T> = Result<T, RoutingError>;

impl RoutingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RoutingError::Graph(e) => e.kind(),
            _ => ErrorKind::InvalidInput,
        }
    }
}
