//! Chaos bag - the token pool a campaign draws from
//!
//! The bag itself is tracked per campaign but is not part of the log
//! evaluator. [`ChaosBagEditor`] holds an edit session: the saved bag plus a
//! working copy whose counts are clamped to each token's physical limit.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A chaos token face. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChaosTokenType {
    #[serde(rename = "+1")]
    PlusOne,
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "-1")]
    MinusOne,
    #[serde(rename = "-2")]
    MinusTwo,
    #[serde(rename = "-3")]
    MinusThree,
    #[serde(rename = "-4")]
    MinusFour,
    #[serde(rename = "-5")]
    MinusFive,
    #[serde(rename = "-6")]
    MinusSix,
    #[serde(rename = "-7")]
    MinusSeven,
    #[serde(rename = "-8")]
    MinusEight,
    #[serde(rename = "skull")]
    Skull,
    #[serde(rename = "cultist")]
    Cultist,
    #[serde(rename = "tablet")]
    Tablet,
    #[serde(rename = "elder_thing")]
    ElderThing,
    #[serde(rename = "auto_fail")]
    AutoFail,
    #[serde(rename = "elder_sign")]
    ElderSign,
    #[serde(rename = "bless")]
    Bless,
    #[serde(rename = "curse")]
    Curse,
}

impl ChaosTokenType {
    pub const ALL: [ChaosTokenType; 18] = [
        Self::PlusOne,
        Self::Zero,
        Self::MinusOne,
        Self::MinusTwo,
        Self::MinusThree,
        Self::MinusFour,
        Self::MinusFive,
        Self::MinusSix,
        Self::MinusSeven,
        Self::MinusEight,
        Self::Skull,
        Self::Cultist,
        Self::Tablet,
        Self::ElderThing,
        Self::AutoFail,
        Self::ElderSign,
        Self::Bless,
        Self::Curse,
    ];

    /// How many copies of this token exist in the physical game.
    pub fn limit(self) -> u32 {
        match self {
            Self::PlusOne => 3,
            Self::Zero => 4,
            Self::MinusOne => 5,
            Self::MinusTwo => 4,
            Self::MinusThree => 3,
            Self::MinusFour | Self::MinusFive => 2,
            Self::MinusSix | Self::MinusSeven | Self::MinusEight => 1,
            Self::Skull | Self::Cultist | Self::Tablet | Self::ElderThing => 4,
            Self::AutoFail | Self::ElderSign => 1,
            Self::Bless | Self::Curse => 10,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::PlusOne => "+1",
            Self::Zero => "0",
            Self::MinusOne => "-1",
            Self::MinusTwo => "-2",
            Self::MinusThree => "-3",
            Self::MinusFour => "-4",
            Self::MinusFive => "-5",
            Self::MinusSix => "-6",
            Self::MinusSeven => "-7",
            Self::MinusEight => "-8",
            Self::Skull => "skull",
            Self::Cultist => "cultist",
            Self::Tablet => "tablet",
            Self::ElderThing => "elder_thing",
            Self::AutoFail => "auto_fail",
            Self::ElderSign => "elder_sign",
            Self::Bless => "bless",
            Self::Curse => "curse",
        }
    }
}

impl fmt::Display for ChaosTokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Token counts in a campaign's chaos bag. Missing tokens count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChaosBag(BTreeMap<ChaosTokenType, u32>);

impl ChaosBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: impl IntoIterator<Item = (ChaosTokenType, u32)>) -> Self {
        let mut bag = Self::new();
        for (token, count) in tokens {
            bag.set(token, count);
        }
        bag
    }

    pub fn count(&self, token: ChaosTokenType) -> u32 {
        self.0.get(&token).copied().unwrap_or(0)
    }

    /// Set a count; zero removes the token from the map.
    pub fn set(&mut self, token: ChaosTokenType, count: u32) {
        if count == 0 {
            self.0.remove(&token);
        } else {
            self.0.insert(token, count);
        }
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    /// True if every token holds the same count in both bags.
    pub fn same_counts(&self, other: &ChaosBag) -> bool {
        ChaosTokenType::ALL
            .iter()
            .all(|t| self.count(*t) == other.count(*t))
    }
}

/// One row of the chaos bag editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaosTokenRow {
    pub token: ChaosTokenType,
    pub original: u32,
    pub count: u32,
    pub limit: u32,
}

/// An edit session over a campaign's chaos bag
#[derive(Debug, Clone)]
pub struct ChaosBagEditor {
    saved: ChaosBag,
    working: ChaosBag,
}

impl ChaosBagEditor {
    pub fn new(saved: ChaosBag) -> Self {
        Self {
            working: saved.clone(),
            saved,
        }
    }

    pub fn working(&self) -> &ChaosBag {
        &self.working
    }

    /// Apply `mutate` to a token's count, clamped to `0..=limit`.
    ///
    /// Returns the new count.
    pub fn mutate_count(&mut self, token: ChaosTokenType, mutate: impl FnOnce(i64) -> i64) -> u32 {
        let current = i64::from(self.working.count(token));
        let next = mutate(current).clamp(0, i64::from(token.limit()));
        let next = u32::try_from(next).unwrap_or(0);
        self.working.set(token, next);
        next
    }

    pub fn increment(&mut self, token: ChaosTokenType) -> u32 {
        self.mutate_count(token, |c| c + 1)
    }

    pub fn decrement(&mut self, token: ChaosTokenType) -> u32 {
        self.mutate_count(token, |c| c - 1)
    }

    pub fn has_pending_edits(&self) -> bool {
        !self.saved.same_counts(&self.working)
    }

    /// Rows in display order.
    ///
    /// With `track_deltas` the `original` column holds the saved count so the
    /// caller can show what changed; otherwise it mirrors the working count.
    pub fn rows(&self, track_deltas: bool) -> Vec<ChaosTokenRow> {
        ChaosTokenType::ALL
            .iter()
            .map(|&token| {
                let count = self.working.count(token);
                ChaosTokenRow {
                    token,
                    original: if track_deltas {
                        self.saved.count(token)
                    } else {
                        count
                    },
                    count,
                    limit: token.limit(),
                }
            })
            .collect()
    }

    /// Discard the working copy.
    pub fn revert(&mut self) {
        self.working = self.saved.clone();
    }

    /// Finish the session, returning the edited bag.
    pub fn commit(self) -> ChaosBag {
        self.working
    }
}
