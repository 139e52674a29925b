//! tn-graph: graph layer for the transit network.
//!
//! Provides:
//! - Stop/segment value types (Node, Edge) with id-based identity
//! - `DirectedGraph` with checked CRUD and neighbour queries
//! - Exhaustive simple-path enumeration with an optional search budget
//! - Stable indexing for matrix-based routing
//!
//! # Example
//!
//! ```
//! use tn_graph::DirectedGraph;
//!
//! let mut graph = DirectedGraph::new();
//! let a = graph.insert_node("A");
//! let b = graph.insert_node("B");
//! graph.connect(a, b, 2.0).unwrap();
//!
//! assert_eq!(graph.neighbours(a).len(), 1);
//! assert_eq!(graph.find_all_paths(a, b), vec![vec![a, b]]);
//! ```

pub mod error;
pub mod graph;
pub mod indexing;
pub mod paths;

// Re-exports for ergonomics
pub use error::{Entity, ErrorKind, GraphError, GraphResult};
pub use graph::{DirectedGraph, Edge, Node};
pub use indexing::IndexMap;
pub use paths::{PathSearch, SearchLimits};
