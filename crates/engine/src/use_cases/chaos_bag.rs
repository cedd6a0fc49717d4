//! Chaos bag use cases.

use std::sync::Arc;

use guidekeeper_domain::{Campaign, CampaignId, ChaosBag, ChaosBagEditor};

use crate::entities::Campaigns;
use crate::infrastructure::ports::ClockPort;
use crate::use_cases::campaign::CampaignError;

/// Replace or edit a campaign's chaos bag.
pub struct UpdateChaosBag {
    campaigns: Arc<Campaigns>,
    clock: Arc<dyn ClockPort>,
}

impl UpdateChaosBag {
    pub fn new(campaigns: Arc<Campaigns>, clock: Arc<dyn ClockPort>) -> Self {
        Self { campaigns, clock }
    }

    /// Replace the bag and persist.
    pub async fn execute(
        &self,
        campaign_id: CampaignId,
        bag: ChaosBag,
    ) -> Result<Campaign, CampaignError> {
        let mut campaign = self.campaigns.require(campaign_id).await?;
        let total = bag.total();
        campaign.replace_chaos_bag(bag, self.clock.now());
        self.campaigns.save(&campaign).await?;

        tracing::info!(
            campaign_id = %campaign_id,
            tokens = total,
            "Updated chaos bag"
        );
        Ok(campaign)
    }

    /// Start an edit session on the campaign's current bag.
    pub async fn open_editor(&self, campaign_id: CampaignId) -> Result<ChaosBagEditor, CampaignError> {
        let campaign = self.campaigns.require(campaign_id).await?;
        Ok(ChaosBagEditor::new(campaign.chaos_bag().clone()))
    }

    /// Persist an edit session. Returns `None` when nothing changed.
    pub async fn commit(
        &self,
        campaign_id: CampaignId,
        editor: ChaosBagEditor,
    ) -> Result<Option<Campaign>, CampaignError> {
        if !editor.has_pending_edits() {
            tracing::debug!(campaign_id = %campaign_id, "Chaos bag unchanged, nothing to save");
            return Ok(None);
        }
        self.execute(campaign_id, editor.commit()).await.map(Some)
    }
}
