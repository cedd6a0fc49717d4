//! Prompt rendering for the current step

use crate::entities::{CampaignLog, Condition, LogCatalog, ScenarioStep, StepKind};
use crate::error::ConditionDiagnostic;
use crate::evaluation::ConditionEvaluator;
use crate::value_objects::BulletType;

/// Placeholder shown for branches the renderer has no component for
pub const COMPLEX_BRANCH_PLACEHOLDER: &str = "A more complex Campaign Log branch of some sort";

/// What the player is shown for a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepPrompt {
    /// A yes/no question about a log entry, with its current answer.
    Binary {
        prompt: String,
        result: bool,
        bullet: BulletType,
    },
    /// The step cannot be rendered; show this message instead.
    Diagnostic(String),
    /// Plain narrative text.
    Text {
        text: Option<String>,
        bullet: BulletType,
    },
}

impl StepPrompt {
    pub fn for_step(step: &ScenarioStep, catalog: &LogCatalog, log: &CampaignLog) -> Self {
        if !matches!(step.kind, StepKind::Branch { .. }) {
            return StepPrompt::Text {
                text: step.text.clone(),
                bullet: step.bullet,
            };
        }

        let Some(branch) = step.branches().first() else {
            return StepPrompt::Diagnostic(COMPLEX_BRANCH_PLACEHOLDER.to_string());
        };

        match &branch.condition {
            Condition::CampaignLog { section, id, .. } => {
                match catalog.get(section.as_str(), id.as_str()) {
                    Some(definition) => {
                        let result = ConditionEvaluator::is_recorded(definition, log);
                        let prompt = step.text.clone().unwrap_or_else(|| {
                            format!(
                                "Check {}. <i>If {}</i>",
                                section,
                                definition.display_text()
                            )
                        });
                        StepPrompt::Binary {
                            prompt,
                            result,
                            bullet: step.bullet,
                        }
                    }
                    None => StepPrompt::Diagnostic(
                        ConditionDiagnostic::unknown_entry(section.as_str(), id.as_str())
                            .to_string(),
                    ),
                }
            }
            _ => StepPrompt::Diagnostic(COMPLEX_BRANCH_PLACEHOLDER.to_string()),
        }
    }

    /// Text to show, whatever the variant.
    pub fn display(&self) -> &str {
        match self {
            StepPrompt::Binary { prompt, .. } => prompt,
            StepPrompt::Diagnostic(message) => message,
            StepPrompt::Text { text, .. } => text.as_deref().unwrap_or(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::campaign_guide::test_support::gathering_guide;
    use crate::entities::{CampaignGuide, GuideDocument, LogEntry};
    use crate::value_objects::{EntryId, SectionName};

    fn prompt_for(guide: &CampaignGuide, scenario: &str, step: &str, log: &CampaignLog) -> StepPrompt {
        let step = guide.scenario(scenario).unwrap().step(step).unwrap();
        StepPrompt::for_step(step, guide.catalog(), log)
    }

    #[test]
    fn binary_prompt_uses_entry_text() {
        let guide = gathering_guide();
        let prompt = prompt_for(&guide, "the_gathering", "check_house", &CampaignLog::new());
        assert_eq!(
            prompt,
            StepPrompt::Binary {
                prompt: "Check campaign_notes. <i>If Your house has burned to the ground.</i>"
                    .to_string(),
                result: false,
                bullet: BulletType::Small,
            }
        );
    }

    #[test]
    fn binary_prompt_reports_current_result() {
        let guide = gathering_guide();
        let mut log = CampaignLog::new();
        log.record_entry(
            SectionName::new("campaign_notes").unwrap(),
            LogEntry::text(EntryId::new("house_burned").unwrap(), "burned"),
        );
        let prompt = prompt_for(&guide, "the_gathering", "check_house", &log);
        assert!(matches!(prompt, StepPrompt::Binary { result: true, .. }));
    }

    #[test]
    fn negated_binary_prompt_reports_whether_entry_is_recorded() {
        let document: GuideDocument = serde_json::from_str(
            r#"{"id":"g","name":"G",
                "log_entries":[{"section":"campaign_notes","id":"house_burned","type":"text","text":"Burned."}],
                "scenarios":[{"id":"s","name":"S","start":"check","steps":[
                    {"id":"check","branches":[
                        {"condition":{"type":"campaign_log","section":"campaign_notes","id":"house_burned","boolCondition":false},"next":"end"}
                    ]},
                    {"id":"end"}
                ]}]}"#,
        )
        .unwrap();
        let guide = CampaignGuide::from_document(document).unwrap();

        let empty = prompt_for(&guide, "s", "check", &CampaignLog::new());
        assert_eq!(
            empty,
            StepPrompt::Binary {
                prompt: "Check campaign_notes. <i>If Burned.</i>".to_string(),
                result: false,
                bullet: BulletType::Default,
            }
        );

        let mut log = CampaignLog::new();
        log.record_entry(
            SectionName::new("campaign_notes").unwrap(),
            LogEntry::text(EntryId::new("house_burned").unwrap(), "Burned."),
        );
        let recorded = prompt_for(&guide, "s", "check", &log);
        assert!(matches!(recorded, StepPrompt::Binary { result: true, .. }));
    }

    #[test]
    fn non_branch_steps_render_text() {
        let guide = gathering_guide();
        let prompt = prompt_for(&guide, "the_gathering", "intro", &CampaignLog::new());
        assert_eq!(prompt.display(), "Read the introduction.");
    }

    mod placeholders {
        use super::*;

        const GUIDE: &str = r#"{
            "id": "g", "name": "G",
            "log_entries": [
                {"section": "earned", "id": "relic", "type": "card", "code": "01116"}
            ],
            "scenarios": [{
                "id": "s", "name": "S", "start": "unknown",
                "steps": [
                    {"id": "unknown", "branches": [
                        {"condition": {"type": "campaign_log", "section": "campaign_notes", "id": "ghost"}, "next": "end"}
                    ], "otherwise": "end"},
                    {"id": "counted", "branches": [
                        {"condition": {"section": "doom", "threshold": 2}, "next": "end"}
                    ], "otherwise": "end"},
                    {"id": "card", "branches": [
                        {"condition": {"type": "campaign_log", "section": "earned", "id": "relic"}, "next": "end"}
                    ], "otherwise": "end"},
                    {"id": "end"}
                ]
            }]
        }"#;

        fn guide() -> CampaignGuide {
            let document: GuideDocument = serde_json::from_str(GUIDE).unwrap();
            CampaignGuide::from_document(document).unwrap()
        }

        #[test]
        fn unknown_entry_renders_diagnostic() {
            let prompt = prompt_for(&guide(), "s", "unknown", &CampaignLog::new());
            assert_eq!(
                prompt,
                StepPrompt::Diagnostic("Unknown campaign log campaign_notes.ghost".to_string())
            );
        }

        #[test]
        fn other_shapes_render_complex_placeholder() {
            let prompt = prompt_for(&guide(), "s", "counted", &CampaignLog::new());
            assert_eq!(prompt.display(), COMPLEX_BRANCH_PLACEHOLDER);
        }

        #[test]
        fn card_entry_without_text_uses_code() {
            let prompt = prompt_for(&guide(), "s", "card", &CampaignLog::new());
            assert_eq!(prompt.display(), "Check earned. <i>If 01116</i>");
        }
    }
}
