//! BidLab Runner — simulation orchestration and data plumbing.
//!
//! This crate builds on `bidlab-core` to provide:
//! - CSV loading of traffic and pacing tables with advertiser filtering
//! - TOML run configuration with content-addressable run IDs
//! - Single- and multi-advertiser simulation runners (rayon across advertisers)
//! - In-memory campaign store with rule-based diagnostics
//! - Seeded mock-data generators for campaigns, traffic and pacing tables
//! - JSON artifact and markdown report export

pub mod campaigns;
pub mod config;
pub mod data_loader;
pub mod diagnostics;
pub mod mock;
pub mod report;
pub mod runner;

pub use campaigns::{Campaign, CampaignStatus, CampaignStore, CampaignUpdate, StoreError};
pub use config::{ConfigError, SimulationConfig};
pub use data_loader::{load_pacing_table, load_traffic, list_advertisers, LoadError};
pub use diagnostics::{diagnose, DiagnosticItem, DiagnosticKind};
pub use report::{save_artifacts, ArtifactPaths};
pub use runner::{run_all, run_simulation, RunError, RunMeta, SimulationReport};
