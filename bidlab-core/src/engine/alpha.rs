//! Alpha resolution — the per-slot CPA threshold.
//!
//! The pacing table encodes, per (slot, category), how realized CPA grows
//! with cumulative spend. The threshold acts as a pacing signal: the
//! resolver raises CPA tolerance only while enough budget remains relative
//! to the historical cost curve, and a 1.5x ceiling bounds the worst-case
//! overspend a single slot can commit to.

use crate::domain::PacingTable;
use crate::engine::ALPHA_CAP_FACTOR;

/// Resolve the CPA threshold (alpha) for one slot.
///
/// Missing pacing data is not an error: absent a (slot, category) group, or
/// when the remaining budget exceeds every breakpoint threshold, the static
/// constraint applies. The result is always clamped to
/// `cpa_constraint * 1.5`.
pub fn resolve_alpha(
    table: &PacingTable,
    slot: u32,
    category: u32,
    remaining_budget: f64,
    cpa_constraint: f64,
) -> f64 {
    let alpha = table
        .lookup(slot, category, remaining_budget)
        .unwrap_or(cpa_constraint);
    alpha.min(cpa_constraint * ALPHA_CAP_FACTOR)
}
