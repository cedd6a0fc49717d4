//! Value objects - validated keys and small enums shared by entities

mod comparator;
mod names;

use serde::{Deserialize, Serialize};

pub use comparator::Comparator;
pub use names::{CampaignName, CardCode, EntryId, ScenarioId, SectionName, StepId};

/// Bullet style a step is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletType {
    #[default]
    Default,
    None,
    Small,
}
