//! Deck slot bookkeeping
//!
//! Slots map card codes to copy counts. Decks are upgraded between scenarios
//! by creating a new deck and linking the old one to it via `next_deck`.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::ids::DeckId;
use crate::value_objects::CardCode;

pub type Slots = BTreeMap<CardCode, u32>;

/// Minimal view of a deck needed to follow upgrade chains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckLink {
    pub id: DeckId,
    pub next_deck: Option<DeckId>,
}

/// One version of an investigator deck tracked by a campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    #[serde(default)]
    pub slots: Slots,
    #[serde(default)]
    pub previous_deck: Option<DeckId>,
    #[serde(default)]
    pub next_deck: Option<DeckId>,
}

impl Deck {
    pub fn new(name: impl Into<String>, slots: Slots) -> Self {
        Self {
            id: DeckId::new(),
            name: name.into(),
            slots,
            previous_deck: None,
            next_deck: None,
        }
    }

    pub fn link(&self) -> DeckLink {
        DeckLink {
            id: self.id,
            next_deck: self.next_deck,
        }
    }
}

/// Result of upgrading a deck between scenarios
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckUpgrade {
    /// The version that was upgraded (the newest one in its chain)
    pub previous: DeckId,
    pub deck: DeckId,
    pub changes: SlotChanges,
}

/// Per-card differences between two versions of a deck's slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotChanges {
    pub additions: Slots,
    pub removals: Slots,
}

impl SlotChanges {
    pub fn between(original: &Slots, current: &Slots) -> Self {
        let mut changes = Self::default();

        for (code, &was) in original {
            let now = current.get(code).copied().unwrap_or(0);
            if was > now {
                changes.removals.insert(code.clone(), was - now);
            }
        }
        for (code, &now) in current {
            let was = original.get(code).copied().unwrap_or(0);
            if now > was {
                changes.additions.insert(code.clone(), now - was);
            }
        }

        changes
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }
}

/// Follow `next_deck` links from `id` to the newest known deck.
///
/// Stops at a link to an unknown deck, and at the first repeated deck if the
/// links form a cycle.
pub fn latest_deck(decks: &HashMap<DeckId, DeckLink>, id: DeckId) -> DeckId {
    let mut current = id;
    let mut visited = HashSet::from([id]);
    while let Some(next) = decks.get(&current).and_then(|d| d.next_deck) {
        if !decks.contains_key(&next) || !visited.insert(next) {
            break;
        }
        current = next;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(pairs: &[(&str, u32)]) -> Slots {
        pairs
            .iter()
            .map(|(code, n)| (CardCode::new(*code).unwrap(), *n))
            .collect()
    }

    #[test]
    fn slot_changes_split_additions_and_removals() {
        let original = slots(&[("01020", 2), ("01021", 1), ("01030", 2)]);
        let current = slots(&[("01020", 1), ("01030", 2), ("02186", 2)]);

        let changes = SlotChanges::between(&original, &current);
        assert_eq!(changes.removals, slots(&[("01020", 1), ("01021", 1)]));
        assert_eq!(changes.additions, slots(&[("02186", 2)]));
    }

    #[test]
    fn identical_slots_have_no_changes() {
        let original = slots(&[("01020", 2)]);
        assert!(SlotChanges::between(&original, &original).is_empty());
    }

    #[test]
    fn latest_deck_follows_chain() {
        let a = DeckId::new();
        let b = DeckId::new();
        let c = DeckId::new();
        let decks = HashMap::from([
            (a, DeckLink { id: a, next_deck: Some(b) }),
            (b, DeckLink { id: b, next_deck: Some(c) }),
            (c, DeckLink { id: c, next_deck: None }),
        ]);
        assert_eq!(latest_deck(&decks, a), c);
    }

    #[test]
    fn latest_deck_stops_at_missing_link_and_cycles() {
        let a = DeckId::new();
        let b = DeckId::new();
        let missing = DeckId::new();

        let dangling = HashMap::from([(a, DeckLink { id: a, next_deck: Some(missing) })]);
        assert_eq!(latest_deck(&dangling, a), a);

        let cycle = HashMap::from([
            (a, DeckLink { id: a, next_deck: Some(b) }),
            (b, DeckLink { id: b, next_deck: Some(a) }),
        ]);
        assert_eq!(latest_deck(&cycle, a), b);
    }

    #[test]
    fn unknown_deck_is_its_own_latest() {
        let id = DeckId::new();
        assert_eq!(latest_deck(&HashMap::new(), id), id);
    }
}
