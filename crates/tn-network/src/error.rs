//! Error types for the network layer.

use std::path::PathBuf;

use tn_core::LineNumber;
use tn_graph::{ErrorKind, GraphError};
use tn_routing::RoutingError;

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("Line {0} already exists")]
    DuplicateLine(LineNumber),

    #[error("Line {0} not found")]
    LineNotFound(LineNumber),

    #[error("Line {0} references a segment missing from the graph")]
    BrokenLine(LineNumber),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Routing error: {0}")]
    Routing(#[from] RoutingError),

    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Config(String),
}

pub type NetworkResult<T> = Result<T, NetworkError>;

impl NetworkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NetworkError::DuplicateLine(_) => ErrorKind::DuplicateId,
            NetworkError::LineNotFound(_) => ErrorKind::NotFound,
            NetworkError::Graph(e) => e.kind(),
            NetworkError::Routing(e) => e.kind(),
            NetworkError::BrokenLine(_)
            | NetworkError::ConfigRead { .. }
            | NetworkError::Config(_) => ErrorKind::InvalidInput,
        }
    }
}
