//! Terminal scoring — conversion volume, penalized for CPA overshoot.

use crate::engine::{EPSILON, SCORE_BETA};

/// Penalty-adjusted score of a finished simulation.
///
/// `penalty = 1` while the realized CPA respects the constraint; beyond it,
/// `penalty = (cpa_constraint / realized_cpa)^2`, a convex cost on
/// overshoot. The score rewards conversion volume scaled by the penalty.
pub fn score(total_conversions: u64, realized_cpa: f64, cpa_constraint: f64) -> f64 {
    let penalty = if realized_cpa > cpa_constraint {
        (cpa_constraint / (realized_cpa + EPSILON)).powf(SCORE_BETA)
    } else {
        1.0
    };
    penalty * total_conversions as f64
}
