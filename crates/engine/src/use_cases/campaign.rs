//! Campaign lifecycle use cases.

use std::sync::Arc;

use guidekeeper_domain::{Campaign, CampaignId, CampaignName, DomainError};

use crate::entities::Campaigns;
use crate::infrastructure::ports::{ClockPort, RepoError};

/// Errors shared by campaign-level use cases.
#[derive(Debug, thiserror::Error)]
pub enum CampaignError {
    #[error("Invalid input: {0}")]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Create a new, empty campaign for a guide.
pub struct CreateCampaign {
    campaigns: Arc<Campaigns>,
    clock: Arc<dyn ClockPort>,
}

impl CreateCampaign {
    pub fn new(campaigns: Arc<Campaigns>, clock: Arc<dyn ClockPort>) -> Self {
        Self { campaigns, clock }
    }

    pub async fn execute(&self, name: &str, guide_id: &str) -> Result<Campaign, CampaignError> {
        let name = CampaignName::new(name)?;
        let guide_id = guide_id.trim();
        if guide_id.is_empty() {
            return Err(DomainError::validation("Guide id cannot be empty").into());
        }

        let campaign = Campaign::new(name, guide_id, self.clock.now());
        self.campaigns.save(&campaign).await?;

        tracing::info!(
            campaign_id = %campaign.id(),
            guide_id = %guide_id,
            "Created campaign"
        );
        Ok(campaign)
    }
}

/// Delete a campaign and everything recorded in it.
pub struct DeleteCampaign {
    campaigns: Arc<Campaigns>,
}

impl DeleteCampaign {
    pub fn new(campaigns: Arc<Campaigns>) -> Self {
        Self { campaigns }
    }

    pub async fn execute(&self, campaign_id: CampaignId) -> Result<(), CampaignError> {
        self.campaigns.require(campaign_id).await?;
        self.campaigns.delete(campaign_id).await?;
        tracing::info!(campaign_id = %campaign_id, "Deleted campaign");
        Ok(())
    }
}
