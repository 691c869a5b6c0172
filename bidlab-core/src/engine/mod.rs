//! Simulation engine — slot-by-slot bidding loop and its collaborators.
//!
//! Per slot, the driver calls:
//! 1. Alpha resolver — pick the CPA threshold from the pacing table
//! 2. Auction — compute bids, wins, costs and conversion draws
//! 3. Budget controller — enforce the ceiling, pro-rata on overspend
//! 4. Metrics accumulation — running totals and derived ratios
//!
//! After the last slot the scorer turns the final totals into a
//! penalty-adjusted score.

pub mod alpha;
pub mod auction;
pub mod budget;
pub mod driver;
pub mod metrics;
pub mod score;

pub use alpha::resolve_alpha;
pub use auction::{run_slot, SlotOutcome};
pub use budget::{apply_budget, CorrectedSlot};
pub use driver::{simulate, SimState, SimulationSummary, StepResult};
pub use metrics::{budget_consumed_pct, Totals};
pub use score::score;

/// Shared epsilon for ratio computations with possibly-zero denominators.
pub const EPSILON: f64 = 1e-10;

/// Alpha ceiling as a multiple of the CPA constraint.
pub const ALPHA_CAP_FACTOR: f64 = 1.5;

/// Exponent of the CPA-violation penalty in the score.
pub const SCORE_BETA: f64 = 2.0;
