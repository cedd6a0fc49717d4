//! Domain entities - campaign log, guide structure and campaign resources

pub mod campaign_guide;
mod campaign_log;
mod chaos_bag;
mod condition;
mod deck;
mod log_entry;
mod scenario_step;

pub use campaign_guide::{
    CampaignGuide, GuideDocument, LogCatalog, RawBranch, RawScenario, RawStep, Scenario,
};
pub use campaign_log::{CampaignLog, LogEffect, LogSection};
pub use chaos_bag::{ChaosBag, ChaosBagEditor, ChaosTokenRow, ChaosTokenType};
pub use condition::{Condition, ConditionResult, RawCondition};
pub use deck::{latest_deck, Deck, DeckLink, DeckUpgrade, SlotChanges, Slots};
pub use log_entry::{LogEntry, LogEntryDefinition, LogEntryKind, LogEntryPayload};
pub use scenario_step::{Branch, ScenarioStep, StepKind};
