//! In-memory campaign storage, for tests and throwaway sessions.

use async_trait::async_trait;
use dashmap::DashMap;
use guidekeeper_domain::{Campaign, CampaignId};

use crate::infrastructure::ports::{CampaignRepo, RepoError};

#[derive(Default)]
pub struct InMemoryCampaignRepo {
    campaigns: DashMap<CampaignId, Campaign>,
}

impl InMemoryCampaignRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }
}

#[async_trait]
impl CampaignRepo for InMemoryCampaignRepo {
    async fn get(&self, id: CampaignId) -> Result<Option<Campaign>, RepoError> {
        Ok(self.campaigns.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, campaign: &Campaign) -> Result<(), RepoError> {
        self.campaigns.insert(campaign.id(), campaign.clone());
        Ok(())
    }

    async fn delete(&self, id: CampaignId) -> Result<(), RepoError> {
        self.campaigns.remove(&id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Campaign>, RepoError> {
        let mut campaigns: Vec<Campaign> = self
            .campaigns
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        campaigns.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
        Ok(campaigns)
    }
}
