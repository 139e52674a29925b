//! tn-core: shared foundation for the transit network crates.
//!
//! Contains:
//! - ids (UUID-backed identifiers for stops and segments, line numbers)
//! - numeric (Cost + tolerances + cost validation helpers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TnError, TnResult};
pub use ids::*;
pub use numeric::*;
