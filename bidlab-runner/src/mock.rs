//! Seeded mock-data generators.
//!
//! Produces the three tables a demo run needs: per-period traffic CSVs,
//! a pacing table shaped like the offline trainer's output, and the
//! campaign fixtures as JSON. All draws come from a caller-seeded RNG so
//! the generated dataset is reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use thiserror::Error;

use bidlab_core::domain::TOTAL_SLOTS;

use crate::campaigns::fixture_campaigns;
use crate::data_loader::{PacingRow, TrafficRow};

#[derive(Debug, Error)]
pub enum MockError {
    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("csv write error for '{path}': {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("json write error for '{path}': {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Shape of one generated dataset.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Budget periods to emit (traffic/period-1.csv .. period-N.csv).
    pub periods: u32,
    /// Traffic rows per period.
    pub records_per_period: usize,
    pub seed: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            periods: 7,
            records_per_period: 1500,
            seed: 42,
        }
    }
}

/// Paths written by `generate_dataset`.
#[derive(Debug, Clone)]
pub struct GeneratedDataset {
    pub traffic: Vec<PathBuf>,
    pub pacing: PathBuf,
    pub campaigns: PathBuf,
}

/// Draw a Beta(1, 50)-distributed conversion probability.
///
/// Inverse CDF of Beta(1, b): p = 1 - (1 - u)^(1/b). Keeps the p_value
/// distribution concentrated near zero, like real conversion estimates.
fn sample_p_value<R: Rng>(rng: &mut R) -> f64 {
    let u: f64 = rng.gen();
    1.0 - (1.0 - u).powf(1.0 / 50.0)
}

/// Traffic rows for one advertiser across one budget period.
///
/// Budget, category and CPA constraint are fixed per advertiser; the
/// least winning cost is correlated with p_value so that higher-value
/// impressions clear at higher prices.
pub fn generate_traffic_rows<R: Rng>(rng: &mut R, advertiser: u32, n: usize) -> Vec<TrafficRow> {
    let cpa_constraint = (rng.gen_range(50.0..200.0_f64) * 100.0).round() / 100.0;
    let budgets = [5000.0, 10_000.0, 20_000.0, 50_000.0];
    let budget = budgets[rng.gen_range(0..budgets.len())];
    let category = rng.gen_range(0..6);

    (0..n)
        .map(|_| {
            let time_slot = rng.gen_range(0..TOTAL_SLOTS as u32);
            let p_value = sample_p_value(rng);
            let base_cost = cpa_constraint * p_value;
            let least_winning_cost = base_cost * rng.gen_range(0.5..1.5);
            let conversion_action = u8::from(rng.gen::<f64>() < p_value);

            TrafficRow {
                advertiser,
                category,
                budget,
                cpa_constraint,
                time_slot,
                p_value,
                least_winning_cost,
                conversion_action,
            }
        })
        .collect()
}

/// A pacing table shaped like the trainer's output: for every
/// (slot, category) group, ascending cumulative-cost thresholds paired
/// with a realized CPA that rises with spend depth.
pub fn generate_pacing_rows<R: Rng>(rng: &mut R) -> Vec<PacingRow> {
    let mut rows = Vec::new();
    for time_slot in 0..TOTAL_SLOTS as u32 {
        for category in 0..6 {
            let base_cpa = rng.gen_range(40.0..120.0_f64);
            let mut cumulative_cost = 0.0;
            for level in 0..8 {
                cumulative_cost += rng.gen_range(500.0..3000.0_f64);
                rows.push(PacingRow {
                    time_slot,
                    category,
                    cumulative_cost,
                    realized_cpa: base_cpa * (1.0 + 0.15 * level as f64),
                });
            }
        }
    }
    rows
}

fn write_csv<T: serde::Serialize>(path: &Path, rows: &[T]) -> Result<(), MockError> {
    let file = std::fs::File::create(path).map_err(|source| MockError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer.serialize(row).map_err(|source| MockError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    }
    writer.flush().map_err(|source| MockError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Write a complete mock dataset under `out_dir`:
/// `traffic/period-N.csv`, `pacing.csv` and `campaigns.json`.
pub fn generate_dataset(
    out_dir: impl AsRef<Path>,
    config: &MockConfig,
) -> Result<GeneratedDataset, MockError> {
    let out_dir = out_dir.as_ref();
    let traffic_dir = out_dir.join("traffic");
    std::fs::create_dir_all(&traffic_dir).map_err(|source| MockError::Io {
        path: traffic_dir.clone(),
        source,
    })?;

    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut traffic_paths = Vec::new();
    for period in 1..=config.periods {
        let rows = generate_traffic_rows(&mut rng, 100 + period, config.records_per_period);
        let path = traffic_dir.join(format!("period-{period}.csv"));
        write_csv(&path, &rows)?;
        traffic_paths.push(path);
    }

    let pacing_rows = generate_pacing_rows(&mut rng);
    let pacing_path = out_dir.join("pacing.csv");
    write_csv(&pacing_path, &pacing_rows)?;

    let campaigns_path = out_dir.join("campaigns.json");
    let json_file = std::fs::File::create(&campaigns_path).map_err(|source| MockError::Io {
        path: campaigns_path.clone(),
        source,
    })?;
    serde_json::to_writer_pretty(json_file, &fixture_campaigns()).map_err(|source| {
        MockError::Json {
            path: campaigns_path.clone(),
            source,
        }
    })?;

    Ok(GeneratedDataset {
        traffic: traffic_paths,
        pacing: pacing_path,
        campaigns: campaigns_path,
    })
}
