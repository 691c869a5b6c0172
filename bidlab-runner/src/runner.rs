//! Simulation runner — wires together loading, the engine and reporting.
//!
//! Entry points:
//! - `run_from_config()`: loads tables from disk, then runs. Used by the CLI.
//! - `run_simulation()`: takes pre-loaded tables, no I/O.
//! - `run_all()`: every advertiser in a traffic file, in parallel. One
//!   independent engine instance per advertiser; determinism comes from the
//!   hash-based seed schedule, not from scheduling order.

use chrono::Utc;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bidlab_core::domain::{AdvertiserProfile, PacingTable, TrafficSource};
use bidlab_core::engine::{simulate, SimulationSummary, StepResult};
use bidlab_core::rng::SeedSchedule;

use crate::config::{ConfigError, SimulationConfig};
use crate::data_loader::{list_advertisers, load_pacing_table, load_traffic, LoadError};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] LoadError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Run parameters echoed into the report for reproducibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMeta {
    pub advertiser: u32,
    pub category: u32,
    pub budget: f64,
    pub cpa_constraint: f64,
    pub period: u32,
    pub seed: u64,
    pub traffic_count: usize,
    pub generated_at: String,
}

/// Complete result of one advertiser's simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub meta: RunMeta,
    pub history: Vec<StepResult>,
    pub summary: SimulationSummary,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Run one advertiser's simulation on pre-loaded tables — no I/O.
pub fn run_simulation(
    profile: &AdvertiserProfile,
    traffic: &TrafficSource,
    pacing: &PacingTable,
    schedule: &SeedSchedule,
    period: u32,
) -> SimulationReport {
    let mut rng = schedule.rng_for(profile.advertiser, period);
    let (history, summary) = simulate(profile, traffic, pacing, &mut rng);

    SimulationReport {
        schema_version: SCHEMA_VERSION,
        meta: RunMeta {
            advertiser: profile.advertiser,
            category: profile.category,
            budget: profile.budget,
            cpa_constraint: profile.cpa_constraint,
            period,
            seed: schedule.master_seed(),
            traffic_count: traffic.len(),
            generated_at: Utc::now().to_rfc3339(),
        },
        history,
        summary,
    }
}

/// Load tables per the config and run a single advertiser.
///
/// This is the high-level entry point used by the CLI.
pub fn run_from_config(config: &SimulationConfig) -> Result<SimulationReport, RunError> {
    config.validate()?;
    let (profile, traffic) = load_traffic(&config.traffic_path, config.advertiser)?;
    let pacing = load_pacing_table(&config.pacing_path)?;
    let schedule = SeedSchedule::new(config.seed);
    Ok(run_simulation(
        &profile,
        &traffic,
        &pacing,
        &schedule,
        config.period,
    ))
}

/// Simulate every advertiser in the traffic file, in parallel.
///
/// Each advertiser gets an independent engine instance and a hash-derived
/// sub-seed, so results are identical regardless of thread count. Reports
/// come back in the traffic file's advertiser order.
pub fn run_all(config: &SimulationConfig) -> Result<Vec<SimulationReport>, RunError> {
    config.validate()?;
    let advertisers = list_advertisers(&config.traffic_path)?;
    let pacing = load_pacing_table(&config.pacing_path)?;
    let schedule = SeedSchedule::new(config.seed);

    advertisers
        .par_iter()
        .map(|&advertiser| {
            let (profile, traffic) = load_traffic(&config.traffic_path, Some(advertiser))?;
            Ok(run_simulation(
                &profile,
                &traffic,
                &pacing,
                &schedule,
                config.period,
            ))
        })
        .collect()
}
