//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Campaign storage (SQLite or in-memory)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::CampaignRepo;
pub use testing::ClockPort;

#[cfg(test)]
pub use repos::MockCampaignRepo;

#[cfg(test)]
pub use testing::MockClockPort;
