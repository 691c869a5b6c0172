//! Simulation driver — the slot loop that ties the collaborators together.
//!
//! Slots are processed strictly in ascending order because remaining budget
//! and running totals are sequential state carried from one slot to the
//! next. The state is an explicit value threaded through each step, not a
//! shared mutable field, so the auction and budget collaborators stay pure
//! and independently testable.
//!
//! The history contains exactly `TOTAL_SLOTS` entries, one per slot. Slots
//! with no traffic still produce an entry (all-zero aggregates, previous
//! alpha carried forward) so the output preserves time continuity.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::{AdvertiserProfile, PacingTable, TrafficSource, TOTAL_SLOTS};
use crate::engine::{
    apply_budget, budget_consumed_pct, resolve_alpha, run_slot, score, Totals,
};

/// Sequential simulation state, threaded through the slot loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    pub remaining_budget: f64,
    pub totals: Totals,
}

impl SimState {
    pub fn new(budget: f64) -> Self {
        Self {
            remaining_budget: budget,
            totals: Totals::default(),
        }
    }
}

/// Immutable snapshot of one processed slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub slot: u32,
    pub alpha: f64,
    pub traffic: u64,
    pub wins: u64,
    pub cost: f64,
    pub conversions: u64,
    pub total_cost: f64,
    pub total_wins: u64,
    pub total_conversions: u64,
    pub remaining_budget: f64,
    pub budget_consumed_pct: f64,
    pub running_cpa: f64,
}

/// Final totals and score of a finished simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub total_cost: f64,
    pub total_conversions: u64,
    pub total_wins: u64,
    pub realized_cpa: f64,
    pub budget_consumed_pct: f64,
    pub score: f64,
}

/// Run one advertiser's simulation over all slots.
///
/// Returns the per-slot history (exactly `TOTAL_SLOTS` entries) and the
/// terminal summary. The RNG drives conversion sampling only; identical
/// seed and inputs replay identically.
pub fn simulate<R: Rng>(
    profile: &AdvertiserProfile,
    traffic: &TrafficSource,
    pacing: &PacingTable,
    rng: &mut R,
) -> (Vec<StepResult>, SimulationSummary) {
    let mut state = SimState::new(profile.budget);
    let mut history = Vec::with_capacity(TOTAL_SLOTS);
    let mut last_alpha = profile.cpa_constraint;

    for slot in 0..TOTAL_SLOTS as u32 {
        let records = traffic.records_for_slot(slot as usize);

        // Empty slots carry the previous alpha forward; resolving against
        // the pacing table only matters where there is traffic to bid on.
        let alpha = if records.is_empty() {
            last_alpha
        } else {
            resolve_alpha(
                pacing,
                slot,
                profile.category,
                state.remaining_budget,
                profile.cpa_constraint,
            )
        };
        last_alpha = alpha;

        let outcome = run_slot(alpha, records, rng);
        let corrected = apply_budget(state.remaining_budget, &outcome);
        let totals = state.totals.accumulate(&corrected, outcome.traffic);

        state = SimState {
            remaining_budget: corrected.new_remaining_budget,
            totals,
        };

        history.push(StepResult {
            slot,
            alpha,
            traffic: outcome.traffic,
            wins: corrected.wins,
            cost: corrected.cost,
            conversions: corrected.conversions,
            total_cost: totals.cost,
            total_wins: totals.wins,
            total_conversions: totals.conversions,
            remaining_budget: state.remaining_budget,
            budget_consumed_pct: budget_consumed_pct(profile.budget, state.remaining_budget),
            running_cpa: totals.running_cpa(),
        });
    }

    let realized_cpa = state.totals.running_cpa();
    let summary = SimulationSummary {
        total_cost: state.totals.cost,
        total_conversions: state.totals.conversions,
        total_wins: state.totals.wins,
        realized_cpa,
        budget_consumed_pct: budget_consumed_pct(profile.budget, state.remaining_budget),
        score: score(state.totals.conversions, realized_cpa, profile.cpa_constraint),
    };

    (history, summary)
}
