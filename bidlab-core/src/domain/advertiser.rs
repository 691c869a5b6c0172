//! Advertiser profile — the fixed parameters of one simulated campaign.

use serde::{Deserialize, Serialize};

/// Immutable advertiser parameters for the duration of one simulation.
///
/// Derived from the advertiser's first traffic row: budget, CPA constraint
/// and category index are constant across a budget period in the source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvertiserProfile {
    pub advertiser: u32,
    pub category: u32,
    pub budget: f64,
    pub cpa_constraint: f64,
}
