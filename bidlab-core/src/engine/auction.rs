//! Auction mechanics for one slot's traffic.
//!
//! Batch loop over the slot's records: bid = alpha * p_value, win when the
//! bid clears the observed market floor, pay the floor (second-price style),
//! and draw one Bernoulli conversion trial per won impression from the
//! injected RNG.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::TrafficRecord;

/// Raw aggregates of one slot's auctions, before budget correction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotOutcome {
    pub traffic: u64,
    pub wins: u64,
    pub cost: f64,
    pub conversions: u64,
}

/// Run all auctions for one slot under a fixed alpha.
///
/// Conversions can only occur on wins; each won impression converts with
/// probability `p_value`. An empty slot yields the all-zero outcome.
pub fn run_slot<R: Rng>(alpha: f64, records: &[TrafficRecord], rng: &mut R) -> SlotOutcome {
    let mut outcome = SlotOutcome {
        traffic: records.len() as u64,
        ..SlotOutcome::default()
    };

    for record in records {
        let bid = alpha * record.p_value;
        if bid >= record.least_winning_cost {
            outcome.wins += 1;
            outcome.cost += record.least_winning_cost;
            if rng.gen::<f64>() < record.p_value {
                outcome.conversions += 1;
            }
        }
    }

    outcome
}
