//! Transfer-aware routing over a transit graph.
//!
//! Costs come from a dense cost matrix and line membership from a dense line
//! matrix, both indexed in the graph's node insertion order. On top of the
//! base edge cost, every step pays a penalty for walking or for changing
//! lines; see [`penalty`](penalty::penalty).

pub mod config;
pub mod dijkstra;
pub mod error;
pub mod matrix;
pub mod penalty;

pub use config::{DEFAULT_TRANSFER_PENALTY, DEFAULT_WALKING_PENALTY, PenaltyConfig};
pub use dijkstra::{Router, ShortestPaths, all_pairs, shortest_paths};
pub use error::{RoutingError, RoutingResult};
pub use matrix::{CostMatrix, LineMatrix};
pub use penalty::{LineSet, penalty};
