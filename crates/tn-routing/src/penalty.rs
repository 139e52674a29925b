//! Walking and transfer penalties.

use std::collections::BTreeSet;

use tn_core::{Cost, LineNumber};

use crate::config::PenaltyConfig;

/// Set of lines, ordered so results are deterministic.
pub type LineSet = BTreeSet<LineNumber>;

/// Penalty for taking an edge served by `next_lines` after arriving on
/// `current_lines`, plus the lines the traveller is riding afterwards.
///
/// | arrived on  | edge served by          | penalty    | riding after   |
/// |-------------|-------------------------|------------|----------------|
/// | foot/origin | nothing (walk)          | walking    | nothing        |
/// | foot/origin | some lines              | transfer   | `next_lines`   |
/// | some lines  | shares a line           | 0          | the shared set |
/// | some lines  | no shared line / nothing| transfer   | `next_lines`   |
pub fn penalty(
    config: &PenaltyConfig,
    current_lines: &LineSet,
    next_lines: &LineSet,
) -> (Cost, LineSet) {
    if current_lines.is_empty() {
        if next_lines.is_empty() {
            return (config.walking_penalty, LineSet::new());
        }
        return (config.transfer_penalty, next_lines.clone());
    }

    let shared: LineSet = current_lines.intersection(next_lines).copied().collect();
    if shared.is_empty() {
        (config.transfer_penalty, next_lines.clone())
    } else {
        (0.0, shared)
    }
}
