//! Graph-specific error types.

use core::fmt;

use thiserror::Error;
use tn_core::{Cost, EdgeId, Id, NodeId};

pub type GraphResult<T> = Result<T, GraphError>;

/// Which kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Node,
    Edge,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Node => f.write_str("Node"),
            Entity::Edge => f.write_str("Edge"),
        }
    }
}

/// Coarse classification shared by every layer of the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DuplicateId,
    NotFound,
    InvalidInput,
}

/// Errors from graph mutation and id lookups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A record with this id is already in the graph.
    #[error("{what} with id {id} already exists")]
    DuplicateId { what: Entity, id: Id },

    /// No record with this id (also raised for a missing edge endpoint).
    #[error("{what} with id {id} does not exist")]
    NotFound { what: Entity, id: Id },

    /// The node still has incident edges; remove them first or cascade.
    #[error("Node {node} is referenced by {edges} edge(s)")]
    NodeInUse { node: NodeId, edges: usize },

    /// Edge cost is negative or not finite.
    #[error("Edge {edge} has invalid cost {value}")]
    InvalidCost { edge: EdgeId, value: Cost },
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::DuplicateId { .. } => ErrorKind::DuplicateId,
            GraphError::NotFound { .. } => ErrorKind::NotFound,
            GraphError::NodeInUse { .. } | GraphError::InvalidCost { .. } => {
                ErrorKind::InvalidInput
            }
        }
    }

    pub(crate) fn node_not_found(id: NodeId) -> Self {
        GraphError::NotFound {
            what: Entity::Node,
            id,
        }
    }

    pub(crate) fn edge_not_found(id: EdgeId) -> Self {
        GraphError::NotFound {
            what: Entity::Edge,
            id,
        }
    }
}
