//! Pacing table — the precomputed (slot, category) → breakpoint index.
//!
//! The offline training process emits rows of
//! `(time_slot, category, cumulative_cost, realized_cpa)`. At load time the
//! rows are grouped into per-(slot, category) arrays sorted by ascending
//! cumulative-cost threshold, so the alpha resolver can binary-search for the
//! first breakpoint exceeding the remaining budget instead of re-scanning
//! raw rows every slot.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One breakpoint on the historical cost curve for a (slot, category) group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacingBreakpoint {
    pub cumulative_cost_threshold: f64,
    pub realized_cpa: f64,
}

/// Grouped, sorted breakpoint index, built once and queried per slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PacingTable {
    groups: HashMap<(u32, u32), Vec<PacingBreakpoint>>,
}

impl PacingTable {
    /// Build the index from raw `(time_slot, category, breakpoint)` rows.
    ///
    /// Rows within a group are sorted ascending by threshold. The source
    /// rows are already emitted in that order by the trainer, but sorting
    /// here keeps the lookup invariant independent of row order on disk.
    pub fn from_rows(rows: impl IntoIterator<Item = (u32, u32, PacingBreakpoint)>) -> Self {
        let mut groups: HashMap<(u32, u32), Vec<PacingBreakpoint>> = HashMap::new();
        for (slot, category, breakpoint) in rows {
            groups.entry((slot, category)).or_default().push(breakpoint);
        }
        for breakpoints in groups.values_mut() {
            breakpoints.sort_by(|a, b| {
                a.cumulative_cost_threshold
                    .total_cmp(&b.cumulative_cost_threshold)
            });
        }
        Self { groups }
    }

    /// The realized CPA of the first breakpoint whose threshold strictly
    /// exceeds `remaining_budget`, or None when the group is missing or the
    /// remaining budget exceeds every threshold.
    pub fn lookup(&self, slot: u32, category: u32, remaining_budget: f64) -> Option<f64> {
        let breakpoints = self.groups.get(&(slot, category))?;
        let idx = breakpoints
            .partition_point(|bp| bp.cumulative_cost_threshold <= remaining_budget);
        breakpoints.get(idx).map(|bp| bp.realized_cpa)
    }

    /// Number of (slot, category) groups in the index.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
