//! Budget ceiling with pro-rata overspend correction.
//!
//! When a slot's raw cost exceeds the remaining budget, the slot is scaled
//! back proportionally: cost is capped at the remaining budget and win /
//! conversion counts are floored by the same ratio. This deliberately
//! discards fractional counts and does not model which specific impressions
//! would have been served; callers must not "fix" the approximation.

use serde::{Deserialize, Serialize};

use crate::engine::SlotOutcome;

/// A slot's aggregates after budget correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectedSlot {
    pub cost: f64,
    pub wins: u64,
    pub conversions: u64,
    pub new_remaining_budget: f64,
}

/// Apply the budget ceiling to one slot's raw outcome.
///
/// Pass-through when the slot cost fits the remaining budget; otherwise the
/// pro-rata scale-back zeroes the remaining budget. The returned remaining
/// budget is never negative.
pub fn apply_budget(remaining_budget: f64, outcome: &SlotOutcome) -> CorrectedSlot {
    if outcome.cost <= remaining_budget {
        return CorrectedSlot {
            cost: outcome.cost,
            wins: outcome.wins,
            conversions: outcome.conversions,
            new_remaining_budget: remaining_budget - outcome.cost,
        };
    }

    let ratio = if outcome.cost > 0.0 {
        remaining_budget / outcome.cost
    } else {
        0.0
    };

    CorrectedSlot {
        cost: remaining_budget,
        wins: (outcome.wins as f64 * ratio).floor() as u64,
        conversions: (outcome.conversions as f64 * ratio).floor() as u64,
        new_remaining_budget: 0.0,
    }
}
