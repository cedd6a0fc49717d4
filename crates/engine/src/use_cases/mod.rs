//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across entity modules to fulfill user stories.

pub mod campaign;
pub mod chaos_bag;
pub mod deck;
pub mod scenario;

pub use campaign::{CampaignError, CreateCampaign, DeleteCampaign};
pub use chaos_bag::UpdateChaosBag;
pub use deck::ManageDecks;
pub use scenario::{AdvanceOutcome, PlayError, PlayScenario, StepView};
