//! Campaigns entity module.
//!
//! Wraps campaign storage for use cases.

use std::sync::Arc;

use guidekeeper_domain::{Campaign, CampaignId};

use crate::infrastructure::ports::{CampaignRepo, RepoError};

/// Campaigns entity - load and store campaign snapshots.
pub struct Campaigns {
    repo: Arc<dyn CampaignRepo>,
}

impl Campaigns {
    pub fn new(repo: Arc<dyn CampaignRepo>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, id: CampaignId) -> Result<Option<Campaign>, RepoError> {
        self.repo.get(id).await
    }

    /// Get a campaign that must exist.
    pub async fn require(&self, id: CampaignId) -> Result<Campaign, RepoError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| RepoError::not_found("Campaign", id))
    }

    pub async fn save(&self, campaign: &Campaign) -> Result<(), RepoError> {
        self.repo.save(campaign).await
    }

    pub async fn delete(&self, id: CampaignId) -> Result<(), RepoError> {
        self.repo.delete(id).await
    }

    pub async fn list(&self) -> Result<Vec<Campaign>, RepoError> {
        self.repo.list().await
    }
}
