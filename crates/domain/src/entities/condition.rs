//! Branch conditions
//!
//! Guide files describe conditions loosely: which variant a condition is was
//! historically decided by which optional fields happened to be present.
//! [`RawCondition`] is that loose, on-disk form. [`RawCondition::classify`]
//! resolves it once, at guide-load time, into the explicit [`Condition`]
//! union that the evaluator dispatches on.

use serde::{Deserialize, Serialize};

use crate::error::ConditionDiagnostic;
use crate::value_objects::{CardCode, Comparator, EntryId, SectionName};

/// A classified branch condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Checks whether a log entry is present; the branch is taken when the
    /// presence equals `expect`.
    CampaignLog {
        section: SectionName,
        id: EntryId,
        expect: bool,
    },

    /// True when at least one of the listed cards is recorded in the section.
    CampaignLogCards {
        section: SectionName,
        cards: Vec<CardCode>,
    },

    /// Compares the section's counter with a literal threshold.
    CampaignLogCount {
        section: SectionName,
        comparator: Comparator,
        threshold: i64,
    },

    /// The guide's condition could not be classified. Always unresolved.
    Unsupported { shape: String },
}

impl Condition {
    pub fn is_supported(&self) -> bool {
        !matches!(self, Condition::Unsupported { .. })
    }

    /// Get a display description of this condition
    pub fn description(&self) -> String {
        match self {
            Condition::CampaignLog {
                section,
                id,
                expect: true,
            } => format!("{}.{} is recorded", section, id),
            Condition::CampaignLog {
                section,
                id,
                expect: false,
            } => format!("{}.{} is not recorded", section, id),
            Condition::CampaignLogCards { section, cards } => {
                let codes: Vec<&str> = cards.iter().map(CardCode::as_str).collect();
                format!("{} contains any of [{}]", section, codes.join(", "))
            }
            Condition::CampaignLogCount {
                section,
                comparator,
                threshold,
            } => format!("count({}) {} {}", section, comparator, threshold),
            Condition::Unsupported { shape } => format!("unsupported condition ({})", shape),
        }
    }
}

/// Outcome of evaluating a condition against a log snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionResult {
    True,
    False,
    Unresolved(ConditionDiagnostic),
}

impl ConditionResult {
    pub fn from_bool(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved(_))
    }
}

// =============================================================================
// Raw (on-disk) conditions
// =============================================================================

/// Condition as written in a guide file, before classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCondition {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<String>>,
    #[serde(
        default,
        alias = "boolCondition",
        skip_serializing_if = "Option::is_none"
    )]
    pub bool_condition: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<i64>,
}

enum Shape {
    Binary,
    Cards,
    Count,
}

impl RawCondition {
    /// Resolve the loose guide shape into an explicit [`Condition`].
    ///
    /// Never fails: anything that cannot be classified becomes
    /// [`Condition::Unsupported`] so the guide still loads and the step renders
    /// a placeholder.
    pub fn classify(&self) -> Condition {
        let shape = match self.kind.as_deref() {
            Some("campaign_log") => Shape::Binary,
            Some("campaign_log_cards") => Shape::Cards,
            Some("campaign_log_count") => Shape::Count,
            Some(other) => return self.unsupported(format!("unknown type '{}'", other)),
            None if self.threshold.is_some() => Shape::Count,
            None if self.cards.is_some() => Shape::Cards,
            None if self.id.is_some() => Shape::Binary,
            None => return self.unsupported("no distinguishing fields".to_string()),
        };

        let Some(section) = self
            .section
            .as_deref()
            .and_then(|s| SectionName::new(s).ok())
        else {
            return self.unsupported("missing section".to_string());
        };

        match shape {
            Shape::Binary => {
                match self.id.as_deref().and_then(|id| EntryId::new(id).ok()) {
                    Some(id) => Condition::CampaignLog {
                        section,
                        id,
                        expect: self.bool_condition.unwrap_or(true),
                    },
                    None => self.unsupported("binary condition without id".to_string()),
                }
            }
            Shape::Cards => {
                let cards: Vec<CardCode> = self
                    .cards
                    .iter()
                    .flatten()
                    .filter_map(|c| CardCode::new(c.as_str()).ok())
                    .collect();
                if cards.is_empty() {
                    self.unsupported("card condition without cards".to_string())
                } else {
                    Condition::CampaignLogCards { section, cards }
                }
            }
            Shape::Count => {
                let comparator = match self.comparator.as_deref() {
                    None => Comparator::default(),
                    Some(symbol) => match symbol.parse() {
                        Ok(c) => c,
                        Err(_) => {
                            return self.unsupported(format!("unknown comparator '{}'", symbol))
                        }
                    },
                };
                match self.threshold {
                    Some(threshold) => Condition::CampaignLogCount {
                        section,
                        comparator,
                        threshold,
                    },
                    None => self.unsupported("count condition without threshold".to_string()),
                }
            }
        }
    }

    fn unsupported(&self, reason: String) -> Condition {
        let kind = self.kind.as_deref().unwrap_or("untyped");
        let section = self.section.as_deref().unwrap_or("?");
        Condition::Unsupported {
            shape: format!("{} on {}: {}", kind, section, reason),
        }
    }
}
