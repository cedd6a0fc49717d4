//! Condition evaluation against a campaign log snapshot

use crate::entities::{
    CampaignLog, Condition, ConditionResult, LogCatalog, LogEntryDefinition, LogEntryKind,
};
use crate::error::ConditionDiagnostic;

/// Evaluates classified conditions using a guide's log-entry catalogue
///
/// Evaluation is a pure function of the condition and the log: the same
/// inputs always give the same [`ConditionResult`].
#[derive(Debug, Clone, Copy)]
pub struct ConditionEvaluator<'a> {
    catalog: &'a LogCatalog,
}

impl<'a> ConditionEvaluator<'a> {
    pub fn new(catalog: &'a LogCatalog) -> Self {
        Self { catalog }
    }

    /// Whether the log holds the entry a definition describes, ignoring any
    /// negation a condition puts on it.
    pub fn is_recorded(definition: &LogEntryDefinition, log: &CampaignLog) -> bool {
        let section = definition.section.as_str();
        match &definition.kind {
            LogEntryKind::Text { .. } => log.check(section, definition.id.as_str()),
            LogEntryKind::Card { code, .. } => log.contains_card(section, code.as_str()),
        }
    }

    pub fn evaluate(&self, condition: &Condition, log: &CampaignLog) -> ConditionResult {
        match condition {
            Condition::CampaignLog {
                section,
                id,
                expect,
            } => {
                let Some(definition) = self.catalog.get(section.as_str(), id.as_str()) else {
                    return ConditionResult::Unresolved(ConditionDiagnostic::unknown_entry(
                        section.as_str(),
                        id.as_str(),
                    ));
                };
                ConditionResult::from_bool(Self::is_recorded(definition, log) == *expect)
            }
            Condition::CampaignLogCards { section, cards } => ConditionResult::from_bool(
                cards
                    .iter()
                    .any(|code| log.contains_card(section.as_str(), code.as_str())),
            ),
            Condition::CampaignLogCount {
                section,
                comparator,
                threshold,
            } => ConditionResult::from_bool(
                comparator.apply(log.count(section.as_str()), *threshold),
            ),
            Condition::Unsupported { shape } => {
                ConditionResult::Unresolved(ConditionDiagnostic::unsupported(shape.as_str()))
            }
        }
    }
}
