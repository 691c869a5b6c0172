//! CSV loading for traffic and pacing tables.
//!
//! Column names follow the upstream table schemas (`advertiserNumber`,
//! `timeStepIndex`, `pValue`, ...); serde renames map them onto snake_case
//! row structs. The loader filters traffic to a single advertiser and
//! derives the advertiser profile from its first row, since budget, CPA
//! constraint and category are constant within a budget period.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use bidlab_core::domain::{
    AdvertiserProfile, PacingBreakpoint, PacingTable, TrafficError, TrafficRecord, TrafficSource,
};

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("csv error in '{path}': {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("table '{path}' has no rows")]
    EmptyTable { path: PathBuf },

    #[error("no traffic data for advertiser {advertiser}")]
    NoDataForAdvertiser { advertiser: u32 },

    #[error("invalid traffic data: {0}")]
    Traffic(#[from] TrafficError),
}

/// One row of the traffic CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficRow {
    #[serde(rename = "advertiserNumber")]
    pub advertiser: u32,
    #[serde(rename = "advertiserCategoryIndex")]
    pub category: u32,
    pub budget: f64,
    #[serde(rename = "CPAConstraint")]
    pub cpa_constraint: f64,
    #[serde(rename = "timeStepIndex")]
    pub time_slot: u32,
    #[serde(rename = "pValue")]
    pub p_value: f64,
    #[serde(rename = "leastWinningCost")]
    pub least_winning_cost: f64,
    /// Historical conversion label; present in the table but unused by the
    /// engine, which re-samples conversions from `p_value`.
    #[serde(rename = "conversionAction")]
    pub conversion_action: u8,
}

/// One row of the pacing-table CSV emitted by the offline trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingRow {
    #[serde(rename = "timeStepIndex")]
    pub time_slot: u32,
    #[serde(rename = "advertiserCategoryIndex")]
    pub category: u32,
    #[serde(rename = "cum_cost")]
    pub cumulative_cost: f64,
    #[serde(rename = "realCPA")]
    pub realized_cpa: f64,
}

fn read_rows<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?);
    }
    if rows.is_empty() {
        return Err(LoadError::EmptyTable {
            path: path.to_path_buf(),
        });
    }
    Ok(rows)
}

/// Distinct advertiser ids in file order.
pub fn list_advertisers(path: impl AsRef<Path>) -> Result<Vec<u32>, LoadError> {
    let rows: Vec<TrafficRow> = read_rows(path.as_ref())?;
    let mut seen = Vec::new();
    for row in &rows {
        if !seen.contains(&row.advertiser) {
            seen.push(row.advertiser);
        }
    }
    Ok(seen)
}

/// Load traffic for one advertiser.
///
/// `advertiser = None` auto-selects the first advertiser in the file,
/// matching the original simulator's behavior. Fails when the file is empty
/// or the requested advertiser has no rows.
pub fn load_traffic(
    path: impl AsRef<Path>,
    advertiser: Option<u32>,
) -> Result<(AdvertiserProfile, TrafficSource), LoadError> {
    let rows: Vec<TrafficRow> = read_rows(path.as_ref())?;

    let advertiser = advertiser.unwrap_or(rows[0].advertiser);
    let mine: Vec<&TrafficRow> = rows.iter().filter(|r| r.advertiser == advertiser).collect();
    let first = mine
        .first()
        .ok_or(LoadError::NoDataForAdvertiser { advertiser })?;

    let profile = AdvertiserProfile {
        advertiser,
        category: first.category,
        budget: first.budget,
        cpa_constraint: first.cpa_constraint,
    };

    let records = mine
        .iter()
        .map(|r| TrafficRecord {
            time_slot: r.time_slot,
            p_value: r.p_value,
            least_winning_cost: r.least_winning_cost,
        })
        .collect();
    let source = TrafficSource::from_records(records)?;

    Ok((profile, source))
}

/// Load the pacing table and build the grouped breakpoint index.
pub fn load_pacing_table(path: impl AsRef<Path>) -> Result<PacingTable, LoadError> {
    let rows: Vec<PacingRow> = read_rows(path.as_ref())?;
    Ok(PacingTable::from_rows(rows.into_iter().map(|r| {
        (
            r.time_slot,
            r.category,
            PacingBreakpoint {
                cumulative_cost_threshold: r.cumulative_cost,
                realized_cpa: r.realized_cpa,
            },
        )
    })))
}
