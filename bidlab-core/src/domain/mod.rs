//! Domain types for BidLab.

pub mod advertiser;
pub mod pacing;
pub mod traffic;

pub use advertiser::AdvertiserProfile;
pub use pacing::{PacingBreakpoint, PacingTable};
pub use traffic::{TrafficError, TrafficRecord, TrafficSource, TOTAL_SLOTS};
