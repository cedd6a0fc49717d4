//! Repository port traits for campaign storage.

use async_trait::async_trait;
use guidekeeper_domain::{Campaign, CampaignId};

use super::error::RepoError;

/// Campaign snapshots, keyed by campaign id.
///
/// `save` is an upsert: it replaces the whole snapshot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepo: Send + Sync {
    async fn get(&self, id: CampaignId) -> Result<Option<Campaign>, RepoError>;
    async fn save(&self, campaign: &Campaign) -> Result<(), RepoError>;
    async fn delete(&self, id: CampaignId) -> Result<(), RepoError>;

    /// All campaigns, most recently updated first.
    async fn list(&self) -> Result<Vec<Campaign>, RepoError>;
}
