//! Terminal rendering for simulation runs.
//!
//! All ANSI output lives here; the engine and runner crates never print.
//! Formatting functions return `String` so they can be tested without
//! capturing stdout.

use bidlab_core::engine::StepResult;
use bidlab_runner::runner::SimulationReport;

pub const BOLD: &str = "\x1b[1m";
pub const GREEN: &str = "\x1b[92m";
pub const CYAN: &str = "\x1b[96m";
pub const YELLOW: &str = "\x1b[93m";
pub const RED: &str = "\x1b[91m";
pub const RESET: &str = "\x1b[0m";

fn colorize(text: impl std::fmt::Display, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{color}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Block progress bar, `width` cells filled proportionally to `percent`.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = (width as f64 * clamped / 100.0) as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"-".repeat(width - filled));
    bar
}

/// One slot's panel: header, budget bar, and a step/cumulative table.
pub fn format_step(step: &StepResult, budget: f64, total_slots: usize, color: bool) -> String {
    let mut out = String::with_capacity(512);

    out.push_str(&format!(
        "Slot {}\n",
        colorize(
            format!("{}/{}", step.slot + 1, total_slots),
            BOLD,
            color
        )
    ));
    out.push_str(&format!(
        "Budget consumed: [{}] {:.1}%\n",
        progress_bar(step.budget_consumed_pct, 30),
        step.budget_consumed_pct
    ));
    out.push_str(&format!(
        "Remaining budget: {} / {:.2}\n",
        colorize(format!("{:.2}", step.remaining_budget), GREEN, color),
        budget
    ));
    out.push_str(&format!(
        "Alpha (CPA threshold): {}\n",
        colorize(format!("{:.4}", step.alpha), YELLOW, color)
    ));

    out.push_str(&format!(
        "{:<12} | {:>12} | {:>12}\n",
        "Metric", "This slot", "Cumulative"
    ));
    out.push_str(&format!("{}\n", "-".repeat(42)));
    out.push_str(&format!(
        "{:<12} | {:>12} | {:>12}\n",
        "Traffic",
        step.traffic,
        "-"
    ));
    out.push_str(&format!(
        "{:<12} | {:>12} | {:>12}\n",
        "Wins", step.wins, step.total_wins
    ));
    out.push_str(&format!(
        "{:<12} | {:>12.2} | {:>12.2}\n",
        "Cost", step.cost, step.total_cost
    ));
    out.push_str(&format!(
        "{:<12} | {:>12} | {:>12}\n",
        "Conversions", step.conversions, step.total_conversions
    ));
    out.push_str(&format!(
        "{:<12} | {:>12} | {:>12}\n",
        "CPA",
        "-",
        colorize(format!("{:.2}", step.running_cpa), CYAN, color)
    ));

    out
}

/// Final report panel.
pub fn format_summary(report: &SimulationReport, color: bool) -> String {
    let meta = &report.meta;
    let s = &report.summary;
    let mut out = String::with_capacity(512);

    out.push_str(&colorize("Simulation finished\n", BOLD, color));
    out.push_str(&format!("{}\n", "=".repeat(60)));
    out.push_str(&format!(
        "Advertiser:        {} (category {}, period {})\n",
        meta.advertiser, meta.category, meta.period
    ));
    out.push_str(&format!(
        "Budget consumed:   {:.2} / {:.2} ({:.1}%)\n",
        s.total_cost, meta.budget, s.budget_consumed_pct
    ));
    out.push_str(&format!("Conversions:       {}\n", s.total_conversions));
    out.push_str(&format!("Wins:              {}\n", s.total_wins));

    let cpa_color = if s.realized_cpa > meta.cpa_constraint {
        RED
    } else {
        CYAN
    };
    out.push_str(&format!(
        "Realized CPA:      {} (constraint: {:.2})\n",
        colorize(format!("{:.2}", s.realized_cpa), cpa_color, color),
        meta.cpa_constraint
    ));
    out.push_str(&format!(
        "Score:             {}\n",
        colorize(format!("{:.2}", s.score), YELLOW, color)
    ));
    out.push_str(&format!("{}\n", "=".repeat(60)));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(0.0, 10), "----------");
        assert_eq!(progress_bar(100.0, 10), "██████████");
        assert_eq!(progress_bar(50.0, 10), "█████-----");
    }

    #[test]
    fn bar_clamps_out_of_range_percent() {
        assert_eq!(progress_bar(-5.0, 10), "----------");
        assert_eq!(progress_bar(250.0, 10), "██████████");
    }

    #[test]
    fn colorless_output_has_no_escapes() {
        let step = StepResult {
            slot: 0,
            alpha: 80.0,
            traffic: 10,
            wins: 4,
            cost: 12.5,
            conversions: 1,
            total_cost: 12.5,
            total_wins: 4,
            total_conversions: 1,
            remaining_budget: 87.5,
            budget_consumed_pct: 12.5,
            running_cpa: 12.5,
        };
        let text = format_step(&step, 100.0, 48, false);
        assert!(!text.contains('\x1b'));
        assert!(text.contains("Slot 1/48"));
        assert!(text.contains("12.5%"));
    }
}
