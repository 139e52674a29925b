//! Transit network built on the graph and routing layers.
//!
//! A [`Network`] owns the stop graph and the transit lines running over it,
//! and answers "which paths exist" and "which path is recommended" queries.

pub mod config;
pub mod error;
pub mod line;
pub mod network;

pub use config::NetworkConfig;
pub use error::{NetworkError, NetworkResult};
pub use line::Line;
pub use network::{Itinerary, Network};
