//! BidLab Core — bidding-simulation engine and domain types.
//!
//! This crate contains the heart of the simulator:
//! - Domain types (advertiser profile, traffic records, pacing breakpoints)
//! - Slot-by-slot simulation driver with explicit threaded state
//! - Alpha resolution against the precomputed pacing table
//! - Auction mechanics (bid, win, cost, conversion sampling)
//! - Budget ceiling with pro-rata overspend correction
//! - Terminal penalty-adjusted scoring
//!
//! The engine performs no I/O: traffic and pacing tables are fully
//! materialized before `simulate()` is called, and all randomness flows
//! through an injected, seedable RNG.

pub mod domain;
pub mod engine;
pub mod rng;
