//! CampaignLog entity - the accumulated record of a campaign
//!
//! The log is a set of named sections, each holding recorded entries, plus a
//! set of named counters. It only grows: entries are appended (or replaced by
//! id), counters are incremented, and crossing an entry out marks it without
//! removing it. Absent sections behave as empty and absent counters as zero.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::entities::log_entry::LogEntry;
use crate::value_objects::{EntryId, SectionName};

/// Mutations a scenario step can apply to the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEffect {
    /// Record (or replace) an entry in a section
    RecordEntry { section: SectionName, entry: LogEntry },
    /// Add `delta` to a section's counter
    Increment { section: SectionName, delta: i64 },
    /// Overwrite a section's counter
    SetCount { section: SectionName, value: i64 },
    /// Mark an entry as crossed out
    CrossOut { section: SectionName, id: EntryId },
}

impl LogEffect {
    /// Section this effect touches
    pub fn section(&self) -> &SectionName {
        match self {
            LogEffect::RecordEntry { section, .. }
            | LogEffect::Increment { section, .. }
            | LogEffect::SetCount { section, .. }
            | LogEffect::CrossOut { section, .. } => section,
        }
    }

    pub fn description(&self) -> String {
        match self {
            LogEffect::RecordEntry { section, entry } => {
                format!("Record {} in {}", entry.id, section)
            }
            LogEffect::Increment { section, delta } => format!("Add {} to {}", delta, section),
            LogEffect::SetCount { section, value } => format!("Set {} to {}", section, value),
            LogEffect::CrossOut { section, id } => format!("Cross out {} in {}", id, section),
        }
    }
}

/// Entries recorded under one section name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSection {
    entries: Vec<LogEntry>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    crossed_out: BTreeSet<EntryId>,
}

impl LogSection {
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&LogEntry> {
        self.entries.iter().find(|e| e.id.as_str() == id)
    }

    pub fn is_crossed_out(&self, id: &str) -> bool {
        self.crossed_out.contains(id)
    }

    /// Entries that have not been crossed out.
    pub fn active_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries
            .iter()
            .filter(|e| !self.crossed_out.contains(e.id.as_str()))
    }

    fn record(&mut self, entry: LogEntry) -> bool {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => {
                *existing = entry;
                false
            }
            None => {
                self.entries.push(entry);
                true
            }
        }
    }
}

/// The accumulated record of facts and counters for one campaign
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignLog {
    #[serde(default)]
    sections: BTreeMap<SectionName, LogSection>,
    #[serde(default)]
    counts: BTreeMap<SectionName, i64>,
}

impl CampaignLog {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// True iff an entry with this id is recorded in the section and has not
    /// been crossed out.
    pub fn check(&self, section: &str, id: &str) -> bool {
        self.sections
            .get(section)
            .map(|s| s.get(id).is_some() && !s.is_crossed_out(id))
            .unwrap_or(false)
    }

    /// Current counter for the section, zero when never touched.
    pub fn count(&self, section: &str) -> i64 {
        self.counts.get(section).copied().unwrap_or(0)
    }

    pub fn section(&self, section: &str) -> Option<&LogSection> {
        self.sections.get(section)
    }

    /// Recorded entries of a section (including crossed-out ones).
    pub fn entries(&self, section: &str) -> &[LogEntry] {
        self.sections
            .get(section)
            .map(LogSection::entries)
            .unwrap_or(&[])
    }

    pub fn section_len(&self, section: &str) -> usize {
        self.sections.get(section).map(LogSection::len).unwrap_or(0)
    }

    /// True iff a non-crossed-out card entry with this code is in the section.
    pub fn contains_card(&self, section: &str, code: &str) -> bool {
        self.sections
            .get(section)
            .map(|s| {
                s.active_entries()
                    .any(|e| e.card_code().is_some_and(|c| c.as_str() == code))
            })
            .unwrap_or(false)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Record an entry, replacing any entry with the same id.
    ///
    /// Returns `true` if the section grew.
    pub fn record_entry(&mut self, section: SectionName, entry: LogEntry) -> bool {
        self.sections.entry(section).or_default().record(entry)
    }

    /// Add `delta` to a counter, returning the new value.
    pub fn increment(&mut self, section: SectionName, delta: i64) -> i64 {
        let count = self.counts.entry(section).or_insert(0);
        *count += delta;
        *count
    }

    pub fn set_count(&mut self, section: SectionName, value: i64) {
        self.counts.insert(section, value);
    }

    /// Mark an entry as crossed out. The entry itself is kept.
    pub fn cross_out(&mut self, section: SectionName, id: EntryId) {
        self.sections
            .entry(section)
            .or_default()
            .crossed_out
            .insert(id);
    }

    pub fn apply_effect(&mut self, effect: &LogEffect) {
        match effect {
            LogEffect::RecordEntry { section, entry } => {
                self.record_entry(section.clone(), entry.clone());
            }
            LogEffect::Increment { section, delta } => {
                self.increment(section.clone(), *delta);
            }
            LogEffect::SetCount { section, value } => self.set_count(section.clone(), *value),
            LogEffect::CrossOut { section, id } => self.cross_out(section.clone(), id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::CardCode;

    fn section(name: &str) -> SectionName {
        SectionName::new(name).unwrap()
    }

    fn entry_id(id: &str) -> EntryId {
        EntryId::new(id).unwrap()
    }

    mod queries {
        use super::*;

        #[test]
        fn unseen_sections_are_empty_and_zero() {
            let log = CampaignLog::new();
            assert!(!log.check("campaign_notes", "anything"));
            assert_eq!(log.count("cultists_interrogated"), 0);
            assert_eq!(log.section_len("campaign_notes"), 0);
            assert!(log.entries("campaign_notes").is_empty());
        }

        #[test]
        fn unrecorded_id_in_known_section_is_false() {
            let mut log = CampaignLog::new();
            log.record_entry(
                section("campaign_notes"),
                LogEntry::text(entry_id("house_burned"), "Burned."),
            );
            assert!(log.check("campaign_notes", "house_burned"));
            assert!(!log.check("campaign_notes", "lita_forced"));
            assert!(!log.check("other_section", "house_burned"));
        }

        #[test]
        fn contains_card_matches_card_entries_only() {
            let mut log = CampaignLog::new();
            log.record_entry(
                section("earned"),
                LogEntry::card(entry_id("lita"), CardCode::new("01117").unwrap()),
            );
            log.record_entry(section("earned"), LogEntry::text(entry_id("01118"), "text"));
            assert!(log.contains_card("earned", "01117"));
            assert!(!log.contains_card("earned", "01118"));
        }
    }

    mod mutations {
        use super::*;

        #[test]
        fn re_recording_replaces_instead_of_growing() {
            let mut log = CampaignLog::new();
            assert!(log.record_entry(
                section("campaign_notes"),
                LogEntry::text(entry_id("ghoul_priest"), "alive"),
            ));
            assert!(!log.record_entry(
                section("campaign_notes"),
                LogEntry::text(entry_id("ghoul_priest"), "still alive"),
            ));

            assert_eq!(log.section_len("campaign_notes"), 1);
            let stored = log.section("campaign_notes").unwrap().get("ghoul_priest").unwrap();
            assert_eq!(
                stored.payload,
                crate::entities::LogEntryPayload::Text {
                    text: "still alive".to_string()
                }
            );
        }

        #[test]
        fn increment_accumulates() {
            let mut log = CampaignLog::new();
            assert_eq!(log.increment(section("cultists"), 2), 2);
            assert_eq!(log.increment(section("cultists"), 1), 3);
            log.set_count(section("doom"), 7);
            assert_eq!(log.count("cultists"), 3);
            assert_eq!(log.count("doom"), 7);
        }

        #[test]
        fn cross_out_hides_entry_but_keeps_it() {
            let mut log = CampaignLog::new();
            log.record_entry(
                section("earned"),
                LogEntry::card(entry_id("lita"), CardCode::new("01117").unwrap()),
            );
            log.cross_out(section("earned"), entry_id("lita"));

            assert!(!log.check("earned", "lita"));
            assert!(!log.contains_card("earned", "01117"));
            assert_eq!(log.section_len("earned"), 1);
        }

        #[test]
        fn apply_effect_dispatches() {
            let mut log = CampaignLog::new();
            log.apply_effect(&LogEffect::RecordEntry {
                section: section("campaign_notes"),
                entry: LogEntry::text(entry_id("house_burned"), "Burned."),
            });
            log.apply_effect(&LogEffect::Increment {
                section: section("cultists"),
                delta: 1,
            });
            assert!(log.check("campaign_notes", "house_burned"));
            assert_eq!(log.count("cultists"), 1);
        }
    }

    #[test]
    fn log_snapshot_round_trips_through_json() {
        let mut log = CampaignLog::new();
        log.record_entry(
            section("campaign_notes"),
            LogEntry::text(entry_id("house_burned"), "Burned."),
        );
        log.increment(section("cultists"), 2);
        log.cross_out(section("campaign_notes"), entry_id("house_burned"));

        let json = serde_json::to_string(&log).unwrap();
        let restored: CampaignLog = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, log);
    }
}
