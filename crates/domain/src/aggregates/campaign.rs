//! Campaign aggregate - one group's play-through of a campaign guide
//!
//! The campaign owns its log, chaos bag and decks and remembers where in the
//! guide the group currently is. It is the unit the engine persists, keyed by
//! [`CampaignId`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entities::{
    latest_deck, CampaignLog, ChaosBag, Deck, DeckLink, DeckUpgrade, LogEffect, SlotChanges, Slots,
};
use crate::error::DomainError;
use crate::ids::{CampaignId, DeckId};
use crate::value_objects::{CampaignName, ScenarioId, StepId};

/// The step a campaign is currently on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioPosition {
    pub scenario: ScenarioId,
    pub step: StepId,
}

impl ScenarioPosition {
    pub fn new(scenario: ScenarioId, step: StepId) -> Self {
        Self { scenario, step }
    }
}

/// A campaign in progress
///
/// # Invariants
///
/// - `guide_id` names the guide the log identifiers are resolved against
/// - `updated_at` moves forward on every mutation
/// - deck ids are unique; upgrades append a new version linked from the old one
#[derive(Debug, Clone, PartialEq)]
pub struct Campaign {
    id: CampaignId,
    name: CampaignName,
    guide_id: String,
    log: CampaignLog,
    chaos_bag: ChaosBag,
    decks: Vec<Deck>,
    position: Option<ScenarioPosition>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Campaign {
    // =========================================================================
    // Constructor
    // =========================================================================

    pub fn new(name: CampaignName, guide_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: CampaignId::new(),
            name,
            guide_id: guide_id.into(),
            log: CampaignLog::new(),
            chaos_bag: ChaosBag::new(),
            decks: Vec::new(),
            position: None,
            created_at: now,
            updated_at: now,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> CampaignId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &CampaignName {
        &self.name
    }

    #[inline]
    pub fn guide_id(&self) -> &str {
        &self.guide_id
    }

    #[inline]
    pub fn log(&self) -> &CampaignLog {
        &self.log
    }

    #[inline]
    pub fn chaos_bag(&self) -> &ChaosBag {
        &self.chaos_bag
    }

    #[inline]
    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn deck(&self, id: DeckId) -> Option<&Deck> {
        self.decks.iter().find(|d| d.id == id)
    }

    /// Newest version in the upgrade chain that `id` belongs to.
    pub fn latest_deck(&self, id: DeckId) -> Option<&Deck> {
        self.deck(id)?;
        let links: HashMap<DeckId, DeckLink> =
            self.decks.iter().map(|d| (d.id, d.link())).collect();
        self.deck(latest_deck(&links, id))
    }

    /// Current scenario and step, `None` between scenarios.
    #[inline]
    pub fn position(&self) -> Option<&ScenarioPosition> {
        self.position.as_ref()
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    pub fn with_chaos_bag(mut self, chaos_bag: ChaosBag) -> Self {
        self.chaos_bag = chaos_bag;
        self
    }

    // =========================================================================
    // Mutation Methods
    // =========================================================================

    pub fn set_name(&mut self, name: CampaignName, now: DateTime<Utc>) {
        self.name = name;
        self.updated_at = now;
    }

    pub fn move_to(&mut self, position: ScenarioPosition, now: DateTime<Utc>) {
        self.position = Some(position);
        self.updated_at = now;
    }

    /// Leave the current scenario.
    pub fn clear_position(&mut self, now: DateTime<Utc>) {
        self.position = None;
        self.updated_at = now;
    }

    pub fn apply_effect(&mut self, effect: &LogEffect, now: DateTime<Utc>) {
        self.log.apply_effect(effect);
        self.updated_at = now;
    }

    pub fn replace_chaos_bag(&mut self, chaos_bag: ChaosBag, now: DateTime<Utc>) {
        self.chaos_bag = chaos_bag;
        self.updated_at = now;
    }

    /// # Errors
    ///
    /// Returns `DomainError::Constraint` if a deck with the same id is
    /// already tracked.
    pub fn add_deck(&mut self, deck: Deck, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.deck(deck.id).is_some() {
            return Err(DomainError::constraint(format!(
                "Campaign {} already tracks deck {}",
                self.id, deck.id
            )));
        }
        self.decks.push(deck);
        self.updated_at = now;
        Ok(())
    }

    /// Record a new version of a deck with the given slots.
    ///
    /// Upgrades always extend the newest version of the chain, so upgrading a
    /// stale id never forks the history.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the deck is not tracked.
    pub fn upgrade_deck(
        &mut self,
        id: DeckId,
        slots: Slots,
        now: DateTime<Utc>,
    ) -> Result<DeckUpgrade, DomainError> {
        let latest = self
            .latest_deck(id)
            .ok_or_else(|| DomainError::not_found("Deck", id.to_string()))?;
        let previous = latest.id;
        let changes = SlotChanges::between(&latest.slots, &slots);

        let mut upgraded = Deck::new(latest.name.clone(), slots);
        upgraded.previous_deck = Some(previous);
        let deck = upgraded.id;

        if let Some(old) = self.decks.iter_mut().find(|d| d.id == previous) {
            old.next_deck = Some(deck);
        }
        self.decks.push(upgraded);
        self.updated_at = now;

        Ok(DeckUpgrade {
            previous,
            deck,
            changes,
        })
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CampaignWireFormat {
    id: CampaignId,
    name: CampaignName,
    guide_id: String,
    #[serde(default)]
    log: CampaignLog,
    #[serde(default)]
    chaos_bag: ChaosBag,
    #[serde(default)]
    decks: Vec<Deck>,
    #[serde(default)]
    position: Option<ScenarioPosition>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Serialize for Campaign {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = CampaignWireFormat {
            id: self.id,
            name: self.name.clone(),
            guide_id: self.guide_id.clone(),
            log: self.log.clone(),
            chaos_bag: self.chaos_bag.clone(),
            decks: self.decks.clone(),
            position: self.position.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Campaign {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = CampaignWireFormat::deserialize(deserializer)?;
        Ok(Self {
            id: wire.id,
            name: wire.name,
            guide_id: wire.guide_id,
            log: wire.log,
            chaos_bag: wire.chaos_bag,
            decks: wire.decks,
            position: wire.position,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        })
    }
}
