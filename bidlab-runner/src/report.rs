//! Reporting and export — JSON, CSV, and Markdown artifact generation.
//!
//! Three export formats for simulation results:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: per-slot history for external analysis tools
//! - **Markdown**: human-readable single-run report
//!
//! All persisted artifacts include a `schema_version` field. Unknown
//! versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::runner::{SimulationReport, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `SimulationReport` to pretty JSON.
pub fn export_json(report: &SimulationReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize SimulationReport to JSON")
}

/// Deserialize a `SimulationReport` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<SimulationReport> {
    let report: SimulationReport =
        serde_json::from_str(json).context("failed to deserialize SimulationReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export the per-slot history as CSV.
///
/// Columns: slot, alpha, traffic, wins, cost, conversions, total_cost,
/// total_wins, total_conversions, remaining_budget, budget_consumed_pct,
/// running_cpa
pub fn export_history_csv(report: &SimulationReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "slot",
        "alpha",
        "traffic",
        "wins",
        "cost",
        "conversions",
        "total_cost",
        "total_wins",
        "total_conversions",
        "remaining_budget",
        "budget_consumed_pct",
        "running_cpa",
    ])?;

    for step in &report.history {
        wtr.write_record([
            &step.slot.to_string(),
            &format!("{:.6}", step.alpha),
            &step.traffic.to_string(),
            &step.wins.to_string(),
            &format!("{:.4}", step.cost),
            &step.conversions.to_string(),
            &format!("{:.4}", step.total_cost),
            &step.total_wins.to_string(),
            &step.total_conversions.to_string(),
            &format!("{:.4}", step.remaining_budget),
            &format!("{:.2}", step.budget_consumed_pct),
            &format!("{:.4}", step.running_cpa),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Files written by `save_artifacts`.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub run_dir: PathBuf,
    pub manifest: PathBuf,
    pub history_csv: PathBuf,
    pub report_md: PathBuf,
}

/// Save the full artifact set for a single simulation run.
///
/// Creates a directory `{run_id}/` under `output_dir` containing:
/// - `manifest.json` — the full `SimulationReport`
/// - `history.csv` — the per-slot history
/// - `report.md` — the Markdown summary
pub fn save_artifacts(
    report: &SimulationReport,
    output_dir: &Path,
    run_id: &str,
) -> Result<ArtifactPaths> {
    let run_dir = output_dir.join(run_id);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let manifest = run_dir.join("manifest.json");
    std::fs::write(&manifest, export_json(report)?)?;

    let history_csv = run_dir.join("history.csv");
    std::fs::write(&history_csv, export_history_csv(report)?)?;

    let report_md = run_dir.join("report.md");
    std::fs::write(&report_md, generate_report(report))?;

    Ok(ArtifactPaths {
        run_dir,
        manifest,
        history_csv,
        report_md,
    })
}

/// Load a `SimulationReport` from an artifact directory's manifest.json.
///
/// Rejects unknown schema versions.
pub fn load_artifacts(dir: &Path) -> Result<SimulationReport> {
    let manifest_path = dir.join("manifest.json");
    let json = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    import_json(&json)
}

// ─── Markdown report ────────────────────────────────────────────────

/// Generate a Markdown report for a single simulation run.
pub fn generate_report(report: &SimulationReport) -> String {
    let mut md = String::with_capacity(4096);

    md.push_str("# Bidding Simulation Report\n\n");

    let meta = &report.meta;
    md.push_str("## Metadata\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Advertiser | {} |\n", meta.advertiser));
    md.push_str(&format!("| Category | {} |\n", meta.category));
    md.push_str(&format!("| Budget | {:.2} |\n", meta.budget));
    md.push_str(&format!("| CPA Constraint | {:.2} |\n", meta.cpa_constraint));
    md.push_str(&format!("| Period | {} |\n", meta.period));
    md.push_str(&format!("| Seed | {} |\n", meta.seed));
    md.push_str(&format!("| Traffic Records | {} |\n", meta.traffic_count));
    md.push_str(&format!("| Generated At | {} |\n", meta.generated_at));
    md.push('\n');

    let s = &report.summary;
    md.push_str("## Summary\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Score | {:.2} |\n", s.score));
    md.push_str(&format!("| Conversions | {} |\n", s.total_conversions));
    md.push_str(&format!("| Wins | {} |\n", s.total_wins));
    md.push_str(&format!("| Total Cost | {:.2} |\n", s.total_cost));
    md.push_str(&format!("| Realized CPA | {:.2} |\n", s.realized_cpa));
    md.push_str(&format!(
        "| Budget Consumed | {:.1}% |\n",
        s.budget_consumed_pct
    ));
    if s.realized_cpa > meta.cpa_constraint {
        md.push_str(&format!(
            "| Constraint | **VIOLATED** ({:.2} > {:.2}) |\n",
            s.realized_cpa, meta.cpa_constraint
        ));
    }
    md.push('\n');

    md.push_str("## Per-Slot History\n\n");
    md.push_str("| Slot | Alpha | Traffic | Wins | Cost | Conv | Remaining | CPA |\n");
    md.push_str("| ---: | ---: | ---: | ---: | ---: | ---: | ---: | ---: |\n");
    for step in &report.history {
        md.push_str(&format!(
            "| {} | {:.2} | {} | {} | {:.2} | {} | {:.2} | {:.2} |\n",
            step.slot,
            step.alpha,
            step.traffic,
            step.wins,
            step.cost,
            step.conversions,
            step.remaining_budget,
            step.running_cpa
        ));
    }
    md.push('\n');

    md
}
