//! Running totals and derived ratios — pure accumulation.
//!
//! No state beyond the returned value: the driver threads `Totals` through
//! the slot loop, and the derived ratios are recomputable from any snapshot.

use serde::{Deserialize, Serialize};

use crate::engine::{CorrectedSlot, EPSILON};

/// Running totals across processed slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub cost: f64,
    pub conversions: u64,
    pub wins: u64,
    pub traffic: u64,
}

impl Totals {
    /// Accumulate one budget-corrected slot into a new total.
    pub fn accumulate(&self, corrected: &CorrectedSlot, slot_traffic: u64) -> Totals {
        Totals {
            cost: self.cost + corrected.cost,
            conversions: self.conversions + corrected.conversions,
            wins: self.wins + corrected.wins,
            traffic: self.traffic + slot_traffic,
        }
    }

    /// Cost per acquisition so far. Epsilon keeps the ratio finite while the
    /// conversion count is zero.
    pub fn running_cpa(&self) -> f64 {
        self.cost / (self.conversions as f64 + EPSILON)
    }
}

/// Fraction of the budget consumed so far, in percent.
pub fn budget_consumed_pct(budget: f64, remaining_budget: f64) -> f64 {
    (budget - remaining_budget) / budget * 100.0
}
