//! Deck use cases.

use std::sync::Arc;

use guidekeeper_domain::{CampaignId, Deck, DeckId, DeckUpgrade, DomainError, Slots};

use crate::entities::Campaigns;
use crate::infrastructure::ports::ClockPort;
use crate::use_cases::campaign::CampaignError;

/// Track investigator decks and their upgrades between scenarios.
pub struct ManageDecks {
    campaigns: Arc<Campaigns>,
    clock: Arc<dyn ClockPort>,
}

impl ManageDecks {
    pub fn new(campaigns: Arc<Campaigns>, clock: Arc<dyn ClockPort>) -> Self {
        Self { campaigns, clock }
    }

    /// Start tracking a deck in the campaign.
    pub async fn add(
        &self,
        campaign_id: CampaignId,
        name: &str,
        slots: Slots,
    ) -> Result<DeckId, CampaignError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Deck name cannot be empty").into());
        }

        let mut campaign = self.campaigns.require(campaign_id).await?;
        let deck = Deck::new(name, slots);
        let deck_id = deck.id;
        campaign.add_deck(deck, self.clock.now())?;
        self.campaigns.save(&campaign).await?;

        tracing::info!(campaign_id = %campaign_id, deck_id = %deck_id, "Added deck");
        Ok(deck_id)
    }

    /// Save a new version of a deck and report the card changes.
    pub async fn upgrade(
        &self,
        campaign_id: CampaignId,
        deck_id: DeckId,
        slots: Slots,
    ) -> Result<DeckUpgrade, CampaignError> {
        let mut campaign = self.campaigns.require(campaign_id).await?;
        let upgrade = campaign.upgrade_deck(deck_id, slots, self.clock.now())?;
        self.campaigns.save(&campaign).await?;

        tracing::info!(
            campaign_id = %campaign_id,
            previous = %upgrade.previous,
            deck_id = %upgrade.deck,
            added = upgrade.changes.additions.len(),
            removed = upgrade.changes.removals.len(),
            "Upgraded deck"
        );
        Ok(upgrade)
    }
}
