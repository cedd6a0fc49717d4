//! Log entries - facts recorded in a campaign log section
//!
//! A recorded [`LogEntry`] lives in the campaign's log. A
//! [`LogEntryDefinition`] lives in the guide and describes what an entry id
//! means (its display text or the card it stands for).

use serde::{Deserialize, Serialize};

use crate::value_objects::{CardCode, EntryId, SectionName};

/// Payload carried by a recorded entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEntryPayload {
    /// Free-text fact ("Your house has burned to the ground.")
    Text { text: String },
    /// A card the investigators earned or lost
    Card { code: CardCode },
}

/// A single fact recorded in a campaign log section.
///
/// Entries are immutable once recorded; re-recording the same id replaces
/// the stored entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: EntryId,
    #[serde(flatten)]
    pub payload: LogEntryPayload,
}

impl LogEntry {
    pub fn text(id: EntryId, text: impl Into<String>) -> Self {
        Self {
            id,
            payload: LogEntryPayload::Text { text: text.into() },
        }
    }

    pub fn card(id: EntryId, code: CardCode) -> Self {
        Self {
            id,
            payload: LogEntryPayload::Card { code },
        }
    }

    /// The card code carried by this entry, if it is a card entry.
    pub fn card_code(&self) -> Option<&CardCode> {
        match &self.payload {
            LogEntryPayload::Card { code } => Some(code),
            LogEntryPayload::Text { .. } => None,
        }
    }
}

/// What a guide says a log entry id means
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEntryKind {
    Text {
        text: String,
    },
    Card {
        code: CardCode,
        #[serde(default)]
        text: Option<String>,
    },
}

/// Guide-side definition of a log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntryDefinition {
    pub section: SectionName,
    pub id: EntryId,
    #[serde(flatten)]
    pub kind: LogEntryKind,
}

impl LogEntryDefinition {
    /// Text shown when prompting about this entry.
    ///
    /// Card entries without text fall back to the card code.
    pub fn display_text(&self) -> &str {
        match &self.kind {
            LogEntryKind::Text { text } => text,
            LogEntryKind::Card { text: Some(text), .. } => text,
            LogEntryKind::Card { code, text: None } => code.as_str(),
        }
    }
}
