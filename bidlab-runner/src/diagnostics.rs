//! Rule-based campaign diagnostics.
//!
//! Scans the campaign store and emits prioritized findings: cold-start
//! failures, loss-making delivery, and under-spending high performers.
//! Purely heuristic — each rule is a threshold on the stored metrics.

use serde::{Deserialize, Serialize};

use crate::campaigns::{Campaign, CampaignStatus, CampaignStore, LearningStage};

/// ROI below this is loss-making.
const ROI_BREAK_EVEN: f64 = 1.0;
/// ROI above this with under-half budget spend flags headroom.
const ROI_HIGH_POTENTIAL: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Warning,
    Opportunity,
    Success,
}

/// One finding, ordered by ascending priority (1 = most urgent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticItem {
    pub kind: DiagnosticKind,
    pub title: String,
    pub description: String,
    pub action: String,
    pub priority: u8,
}

/// Evaluate all rules over the store, sorted by priority.
pub fn diagnose(store: &CampaignStore) -> Vec<DiagnosticItem> {
    let mut findings = Vec::new();

    for campaign in store.list(None, 0, usize::MAX) {
        if campaign.learning_stage == LearningStage::Failed {
            findings.push(learning_failed(campaign));
        }
        if campaign.roi < ROI_BREAK_EVEN && campaign.status == CampaignStatus::Active {
            findings.push(below_break_even(campaign));
        }
        if campaign.roi > ROI_HIGH_POTENTIAL && campaign.spend < campaign.budget * 0.5 {
            findings.push(high_potential(campaign));
        }
    }

    if findings.is_empty() {
        findings.push(DiagnosticItem {
            kind: DiagnosticKind::Success,
            title: "Delivery healthy".to_string(),
            description: "All campaigns are running normally; nothing needs attention."
                .to_string(),
            action: "View detailed report".to_string(),
            priority: 3,
        });
    }

    findings.sort_by_key(|f| f.priority);
    findings
}

fn learning_failed(campaign: &Campaign) -> DiagnosticItem {
    DiagnosticItem {
        kind: DiagnosticKind::Warning,
        title: format!("Campaign [{}] failed its learning phase", campaign.name),
        description: format!(
            "Cold start failed; CTR {:.2}% is below the category baseline. \
             Review the audience targeting or raise the bid.",
            campaign.ctr
        ),
        action: "Open optimization settings".to_string(),
        priority: 1,
    }
}

fn below_break_even(campaign: &Campaign) -> DiagnosticItem {
    DiagnosticItem {
        kind: DiagnosticKind::Warning,
        title: format!("Campaign [{}] is below break-even ROI", campaign.name),
        description: format!(
            "ROI is {:.1}, under the {ROI_BREAK_EVEN:.1} break-even line. \
             Continued delivery loses money.",
            campaign.roi
        ),
        action: "Pause campaign".to_string(),
        priority: 1,
    }
}

fn high_potential(campaign: &Campaign) -> DiagnosticItem {
    DiagnosticItem {
        kind: DiagnosticKind::Opportunity,
        title: format!("High-potential campaign [{}]", campaign.name),
        description: format!(
            "ROI is {:.1} but only {:.1}% of budget is spent; there is room to scale.",
            campaign.roi,
            campaign.spend / campaign.budget * 100.0
        ),
        action: "Raise bid +15%".to_string(),
        priority: 2,
    }
}
