//! Campaign persistence adapters
//!
//! Both adapters store the whole campaign snapshot under its id.

mod memory_campaign_repo;
mod sqlite_campaign_repo;

pub use memory_campaign_repo::InMemoryCampaignRepo;
pub use sqlite_campaign_repo::SqliteCampaignRepo;
