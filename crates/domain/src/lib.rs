//! Guidekeeper domain - campaign log, guide structure and branch evaluation
//!
//! Pure types with no I/O. The engine crate owns persistence and playback.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod evaluation;
pub mod ids;
pub mod value_objects;

pub use aggregates::{Campaign, ScenarioPosition};

pub use entities::{
    latest_deck, Branch, CampaignGuide, CampaignLog, ChaosBag, ChaosBagEditor, ChaosTokenRow,
    ChaosTokenType, Condition, ConditionResult, Deck, DeckLink, DeckUpgrade, GuideDocument,
    LogCatalog, LogEffect, LogEntry, LogEntryDefinition, LogEntryKind, LogEntryPayload,
    LogSection, RawCondition, Scenario, ScenarioStep, SlotChanges, Slots, StepKind,
};

pub use error::{ConditionDiagnostic, DomainError};

pub use evaluation::{
    ConditionEvaluator, Playthrough, PlaythroughEnd, StepInterpreter, StepPrompt, Transition,
    TransitionKind,
};

pub use ids::{CampaignId, DeckId};

pub use value_objects::{
    BulletType, CampaignName, CardCode, Comparator, EntryId, ScenarioId, SectionName, StepId,
};
