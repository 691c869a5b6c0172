//! BidLab CLI — mock data, simulation, and campaign commands.
//!
//! Commands:
//! - `generate` — write a seeded mock dataset (traffic CSVs, pacing table, campaigns)
//! - `run` — run a bidding simulation from a TOML config or table paths
//! - `campaigns` — print the campaign table and rule-based diagnostics

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use bidlab_runner::campaigns::{CampaignStatus, CampaignStore, LearningStage};
use bidlab_runner::diagnostics::{diagnose, DiagnosticKind};
use bidlab_runner::mock::{generate_dataset, MockConfig};
use bidlab_runner::report::{generate_report, save_artifacts};
use bidlab_runner::runner::{run_all, run_from_config};
use bidlab_runner::SimulationConfig;

mod render;

#[derive(Parser)]
#[command(name = "bidlab", about = "BidLab — advertiser bidding simulation engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a seeded mock dataset: traffic CSVs, pacing table, campaign fixtures.
    Generate {
        /// Output directory.
        #[arg(long, default_value = "data")]
        out: PathBuf,

        /// Master seed for the generators.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Budget periods to generate (one traffic CSV each).
        #[arg(long, default_value_t = 7)]
        periods: u32,

        /// Traffic rows per period.
        #[arg(long, default_value_t = 1500)]
        records: usize,
    },
    /// Run a bidding simulation from a TOML config file or table paths.
    Run {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Traffic CSV (alternative to --config).
        #[arg(long)]
        traffic: Option<PathBuf>,

        /// Pacing-table CSV (alternative to --config).
        #[arg(long)]
        pacing: Option<PathBuf>,

        /// Advertiser to simulate. Defaults to the first in the traffic file.
        #[arg(long)]
        advertiser: Option<u32>,

        /// Master seed override.
        #[arg(long)]
        seed: Option<u64>,

        /// Simulate every advertiser in the traffic file.
        #[arg(long, default_value_t = false)]
        all: bool,

        /// Output directory for artifacts.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print the Markdown report to stdout as well.
        #[arg(long, default_value_t = false)]
        report: bool,

        /// Skip the per-slot panels; print only the final summary.
        #[arg(long, default_value_t = false)]
        quiet: bool,
    },
    /// Print the campaign table and diagnostics.
    Campaigns {
        /// Emit the campaign list as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            out,
            seed,
            periods,
            records,
        } => run_generate(out, seed, periods, records),
        Commands::Run {
            config,
            traffic,
            pacing,
            advertiser,
            seed,
            all,
            out,
            report,
            quiet,
        } => run_simulation_cmd(
            config, traffic, pacing, advertiser, seed, all, out, report, quiet,
        ),
        Commands::Campaigns { json } => run_campaigns(json),
    }
}

fn run_generate(out: PathBuf, seed: u64, periods: u32, records: usize) -> Result<()> {
    let dataset = generate_dataset(
        &out,
        &MockConfig {
            periods,
            records_per_period: records,
            seed,
        },
    )?;

    println!("Generated dataset (seed {seed}):");
    for path in &dataset.traffic {
        println!("  {}", path.display());
    }
    println!("  {}", dataset.pacing.display());
    println!("  {}", dataset.campaigns.display());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_simulation_cmd(
    config_path: Option<PathBuf>,
    traffic: Option<PathBuf>,
    pacing: Option<PathBuf>,
    advertiser: Option<u32>,
    seed: Option<u64>,
    all: bool,
    out: Option<PathBuf>,
    report: bool,
    quiet: bool,
) -> Result<()> {
    if config_path.is_some() && (traffic.is_some() || pacing.is_some()) {
        bail!("--config and --traffic/--pacing are mutually exclusive");
    }

    let mut config = if let Some(path) = config_path {
        SimulationConfig::from_file(&path)?
    } else {
        match (traffic, pacing) {
            (Some(t), Some(p)) => SimulationConfig::new(t, p),
            _ => bail!("either --config or both --traffic and --pacing are required"),
        }
    };
    if let Some(advertiser) = advertiser {
        config.advertiser = Some(advertiser);
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(out) = out {
        config.output_dir = out;
    }

    let color = std::io::stdout().is_terminal();

    if all {
        let reports = run_all(&config)?;
        for rep in &reports {
            print!("{}", render::format_summary(rep, color));
        }
        println!("Simulated {} advertiser(s).", reports.len());
        return Ok(());
    }

    let rep = run_from_config(&config)?;

    if !quiet {
        for step in &rep.history {
            println!(
                "{}",
                render::format_step(step, rep.meta.budget, rep.history.len(), color)
            );
        }
    }
    print!("{}", render::format_summary(&rep, color));

    let paths = save_artifacts(&rep, &config.output_dir, &config.run_id())?;
    println!("Artifacts saved to: {}", paths.run_dir.display());

    if report {
        println!();
        print!("{}", generate_report(&rep));
    }

    Ok(())
}

fn run_campaigns(json: bool) -> Result<()> {
    let store = CampaignStore::with_fixtures();
    let campaigns = store.list(None, 0, usize::MAX);

    if json {
        println!("{}", serde_json::to_string_pretty(&campaigns)?);
        return Ok(());
    }

    println!(
        "{:<5} {:<32} {:<9} {:>10} {:>10} {:>7} {:>6} {:<9}",
        "Id", "Name", "Status", "Budget", "Spend", "CPA", "ROI", "Learning"
    );
    println!("{}", "-".repeat(95));
    for c in &campaigns {
        let status = match c.status {
            CampaignStatus::Active => "active",
            CampaignStatus::Learning => "learning",
            CampaignStatus::Paused => "paused",
        };
        let stage = match c.learning_stage {
            LearningStage::Passed => "passed",
            LearningStage::Learning => "learning",
            LearningStage::Failed => "failed",
        };
        println!(
            "{:<5} {:<32} {:<9} {:>10.2} {:>10.2} {:>7.2} {:>6.2} {:<9}",
            c.id, c.name, status, c.budget, c.spend, c.cpa, c.roi, stage
        );
    }

    let findings = diagnose(&store);
    println!();
    println!("Diagnostics:");
    for item in &findings {
        let label = match item.kind {
            DiagnosticKind::Warning => "WARN",
            DiagnosticKind::Opportunity => "OPPORTUNITY",
            DiagnosticKind::Success => "OK",
        };
        println!("  [{label}] {}: {}", item.title, item.description);
        println!("         action: {}", item.action);
    }

    Ok(())
}
