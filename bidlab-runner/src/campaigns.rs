//! In-memory campaign store.
//!
//! A thin CRUD shell around the engine: campaigns are display/bookkeeping
//! records only, the simulator consumes traffic tables directly. Seeded
//! with a handful of showcase campaigns so `bidlab campaigns` and the
//! diagnostics rules have something to chew on.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("campaign {0} not found")]
    NotFound(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Learning,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStage {
    Passed,
    Learning,
    Failed,
}

/// One campaign record with its headline delivery metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: u32,
    pub name: String,
    pub status: CampaignStatus,
    pub budget: f64,
    pub bid: f64,
    pub spend: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub ctr: f64,
    pub cvr: f64,
    pub cpa: f64,
    pub roi: f64,
    pub learning_stage: LearningStage,
    pub bid_type: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial update; None fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignUpdate {
    pub name: Option<String>,
    pub budget: Option<f64>,
    pub bid: Option<f64>,
    pub status: Option<CampaignStatus>,
}

/// Fields accepted when creating a campaign; delivery metrics start at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignCreate {
    pub name: String,
    pub budget: f64,
    pub bid: f64,
    pub bid_type: String,
}

/// In-memory campaign collection keyed by id.
#[derive(Debug, Clone, Default)]
pub struct CampaignStore {
    campaigns: BTreeMap<u32, Campaign>,
}

impl CampaignStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the showcase fixture campaigns.
    pub fn with_fixtures() -> Self {
        let mut store = Self::new();
        for campaign in fixture_campaigns() {
            store.campaigns.insert(campaign.id, campaign);
        }
        store
    }

    /// Campaigns, optionally filtered by status, with offset/limit paging.
    pub fn list(
        &self,
        status: Option<CampaignStatus>,
        offset: usize,
        limit: usize,
    ) -> Vec<&Campaign> {
        self.campaigns
            .values()
            .filter(|c| status.map_or(true, |s| c.status == s))
            .skip(offset)
            .take(limit)
            .collect()
    }

    pub fn get(&self, id: u32) -> Result<&Campaign, StoreError> {
        self.campaigns.get(&id).ok_or(StoreError::NotFound(id))
    }

    /// Create a campaign. Ids are allocated as max + 1, starting at 101.
    pub fn create(&mut self, request: CampaignCreate) -> &Campaign {
        let id = self.campaigns.keys().max().copied().unwrap_or(100) + 1;
        let now = Utc::now().to_rfc3339();
        let campaign = Campaign {
            id,
            name: request.name,
            status: CampaignStatus::Learning,
            budget: request.budget,
            bid: request.bid,
            spend: 0.0,
            impressions: 0,
            clicks: 0,
            ctr: 0.0,
            cvr: 0.0,
            cpa: 0.0,
            roi: 0.0,
            learning_stage: LearningStage::Learning,
            bid_type: request.bid_type,
            created_at: now.clone(),
            updated_at: now,
        };
        self.campaigns.entry(id).or_insert(campaign)
    }

    pub fn update(&mut self, id: u32, update: CampaignUpdate) -> Result<&Campaign, StoreError> {
        let campaign = self.campaigns.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if let Some(name) = update.name {
            campaign.name = name;
        }
        if let Some(budget) = update.budget {
            campaign.budget = budget;
        }
        if let Some(bid) = update.bid {
            campaign.bid = bid;
        }
        if let Some(status) = update.status {
            campaign.status = status;
        }
        campaign.updated_at = Utc::now().to_rfc3339();
        Ok(campaign)
    }

    pub fn delete(&mut self, id: u32) -> Result<Campaign, StoreError> {
        self.campaigns.remove(&id).ok_or(StoreError::NotFound(id))
    }

    /// Pause an active/learning campaign or re-activate a paused one.
    pub fn toggle(&mut self, id: u32) -> Result<&Campaign, StoreError> {
        let campaign = self.campaigns.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        campaign.status = match campaign.status {
            CampaignStatus::Paused => CampaignStatus::Active,
            _ => CampaignStatus::Paused,
        };
        campaign.updated_at = Utc::now().to_rfc3339();
        Ok(campaign)
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }
}

/// The five showcase campaigns used by demos and diagnostics tests.
pub fn fixture_campaigns() -> Vec<Campaign> {
    let now = Utc::now().to_rfc3339();
    let base = |id: u32, name: &str| Campaign {
        id,
        name: name.to_string(),
        status: CampaignStatus::Active,
        budget: 0.0,
        bid: 0.0,
        spend: 0.0,
        impressions: 0,
        clicks: 0,
        ctr: 0.0,
        cvr: 0.0,
        cpa: 0.0,
        roi: 0.0,
        learning_stage: LearningStage::Passed,
        bid_type: "oCPM".to_string(),
        created_at: now.clone(),
        updated_at: now.clone(),
    };

    vec![
        Campaign {
            budget: 5000.0,
            bid: 45.0,
            spend: 3200.5,
            impressions: 85_200,
            clicks: 2130,
            ctr: 2.5,
            cvr: 3.2,
            cpa: 47.06,
            roi: 3.8,
            ..base(101, "winter-coats-launch-v1")
        },
        Campaign {
            status: CampaignStatus::Learning,
            learning_stage: LearningStage::Learning,
            bid_type: "NOBID".to_string(),
            budget: 2000.0,
            bid: 120.0,
            spend: 450.0,
            impressions: 12_000,
            clicks: 180,
            ctr: 1.5,
            cvr: 1.1,
            cpa: 225.0,
            roi: 0.8,
            ..base(102, "beauty-gift-box-presale")
        },
        Campaign {
            status: CampaignStatus::Paused,
            learning_stage: LearningStage::Failed,
            bid_type: "CPC".to_string(),
            budget: 1000.0,
            bid: 20.0,
            spend: 890.0,
            impressions: 150_000,
            clicks: 4500,
            ctr: 3.0,
            cvr: 0.5,
            cpa: 39.55,
            roi: 1.2,
            ..base(103, "clearance-longtail-003")
        },
        Campaign {
            budget: 8000.0,
            bid: 80.0,
            spend: 5600.0,
            impressions: 220_000,
            clicks: 6600,
            ctr: 3.0,
            cvr: 2.8,
            cpa: 30.27,
            roi: 4.5,
            ..base(104, "brand-awareness-spring-ab")
        },
        Campaign {
            budget: 3000.0,
            bid: 150.0,
            spend: 1800.0,
            impressions: 8000,
            clicks: 320,
            ctr: 4.0,
            cvr: 5.5,
            cpa: 102.27,
            roi: 5.2,
            ..base(105, "high-value-audience-precision")
        },
    ]
}
