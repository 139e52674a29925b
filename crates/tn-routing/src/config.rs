//! Penalty configuration.

use tn_core::{Cost, ensure_cost};

use crate::error::RoutingResult;

pub const DEFAULT_WALKING_PENALTY: Cost = 10.0;
pub const DEFAULT_TRANSFER_PENALTY: Cost = 1.0;

/// Extra costs charged on top of edge weights.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PenaltyConfig {
    /// Charged for a step taken on foot after arriving on foot (or at the origin).
    pub walking_penalty: Cost,
    /// Charged for boarding a line or changing between lines.
    pub transfer_penalty: Cost,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            walking_penalty: DEFAULT_WALKING_PENALTY,
            transfer_penalty: DEFAULT_TRANSFER_PENALTY,
        }
    }
}

impl PenaltyConfig {
    /// No penalties at all: plain shortest path on edge weights.
    pub fn none() -> Self {
        Self {
            walking_penalty: 0.0,
            transfer_penalty: 0.0,
        }
    }

    /// Both penalties must be finite and non-negative.
    pub fn validate(&self) -> RoutingResult<()> {
        ensure_cost(self.walking_penalty, "walking penalty")?;
        ensure_cost(self.transfer_penalty, "transfer penalty")?;
        Ok(())
    }
}
