//! CampaignGuide entity - static, versioned rule data for a campaign
//!
//! A guide is loaded from a [`GuideDocument`] (the deserialized guide file)
//! and validated once. After loading, every condition is classified, every
//! step reference resolves inside its scenario, and the log-entry catalogue
//! is indexed by section and id.
//!
//! Invalid references are load errors. Unclassifiable conditions are not:
//! they load as [`Condition::Unsupported`] and render as placeholders.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::entities::campaign_log::LogEffect;
use crate::entities::condition::{Condition, RawCondition};
use crate::entities::log_entry::LogEntryDefinition;
use crate::entities::scenario_step::{Branch, ScenarioStep, StepKind};
use crate::error::DomainError;
use crate::value_objects::{BulletType, ScenarioId, StepId};

// =============================================================================
// Guide document (on-disk form)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideDocument {
    pub id: String,
    pub name: String,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub log_entries: Vec<LogEntryDefinition>,
    #[serde(default)]
    pub scenarios: Vec<RawScenario>,
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawScenario {
    pub id: String,
    pub name: String,
    pub start: String,
    #[serde(default)]
    pub steps: Vec<RawStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStep {
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub bullet_type: BulletType,
    #[serde(default)]
    pub effects: Vec<LogEffect>,
    #[serde(default)]
    pub branches: Vec<RawBranch>,
    #[serde(default)]
    pub otherwise: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBranch {
    pub condition: RawCondition,
    pub next: String,
}

// =============================================================================
// Log entry catalogue
// =============================================================================

/// Guide definitions of log entries, indexed by section then id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogCatalog {
    sections: BTreeMap<String, BTreeMap<String, LogEntryDefinition>>,
}

impl LogCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalogue, rejecting duplicate (section, id) pairs.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = LogEntryDefinition>,
    ) -> Result<Self, DomainError> {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.insert(definition)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, definition: LogEntryDefinition) -> Result<(), DomainError> {
        let section = self
            .sections
            .entry(definition.section.as_str().to_string())
            .or_default();
        let id = definition.id.as_str().to_string();
        if section.contains_key(&id) {
            return Err(DomainError::validation(format!(
                "Duplicate log entry definition {}.{}",
                definition.section, id
            )));
        }
        section.insert(id, definition);
        Ok(())
    }

    pub fn get(&self, section: &str, id: &str) -> Option<&LogEntryDefinition> {
        self.sections.get(section).and_then(|s| s.get(id))
    }

    pub fn len(&self) -> usize {
        self.sections.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Scenario
// =============================================================================

/// A scenario's step graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    id: ScenarioId,
    name: String,
    start: StepId,
    steps: BTreeMap<StepId, ScenarioStep>,
}

impl Scenario {
    pub fn id(&self) -> &ScenarioId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> &StepId {
        &self.start
    }

    pub fn step(&self, id: &str) -> Option<&ScenarioStep> {
        self.steps.get(id)
    }

    pub fn steps(&self) -> impl Iterator<Item = &ScenarioStep> {
        self.steps.values()
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    fn from_raw(raw: RawScenario) -> Result<Self, DomainError> {
        let id = ScenarioId::new(raw.id)?;
        let start = StepId::new(raw.start)?;

        let mut steps = BTreeMap::new();
        for raw_step in raw.steps {
            let step = build_step(&id, raw_step)?;
            if steps.contains_key(&step.id) {
                return Err(DomainError::validation(format!(
                    "Scenario {} declares step {} twice",
                    id, step.id
                )));
            }
            steps.insert(step.id.clone(), step);
        }

        if !steps.contains_key(&start) {
            return Err(DomainError::validation(format!(
                "Scenario {} starts at unknown step {}",
                id, start
            )));
        }

        for step in steps.values() {
            for target in step.successors() {
                if !steps.contains_key(target) {
                    return Err(DomainError::validation(format!(
                        "Step {}.{} leads to unknown step {}",
                        id, step.id, target
                    )));
                }
            }
        }

        Ok(Self {
            id,
            name: raw.name,
            start,
            steps,
        })
    }
}

fn build_step(scenario: &ScenarioId, raw: RawStep) -> Result<ScenarioStep, DomainError> {
    let id = StepId::new(raw.id)?;
    let conflict = |what: &str| {
        DomainError::validation(format!(
            "Step {}.{} declares both {}",
            scenario, id, what
        ))
    };

    let kind = if !raw.branches.is_empty() {
        if raw.next.is_some() {
            return Err(conflict("branches and next"));
        }
        if raw.resolution.is_some() {
            return Err(conflict("branches and a resolution"));
        }
        let branches = raw
            .branches
            .into_iter()
            .map(|b| -> Result<Branch, DomainError> {
                Ok(Branch {
                    condition: b.condition.classify(),
                    next: StepId::new(b.next)?,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        StepKind::Branch {
            branches,
            otherwise: raw.otherwise.map(StepId::new).transpose()?,
        }
    } else if raw.otherwise.is_some() {
        return Err(DomainError::validation(format!(
            "Step {}.{} declares otherwise without branches",
            scenario, id
        )));
    } else if let Some(next) = raw.next {
        if raw.resolution.is_some() {
            return Err(conflict("next and a resolution"));
        }
        StepKind::Linear {
            next: StepId::new(next)?,
        }
    } else {
        StepKind::Terminal {
            resolution: raw.resolution,
        }
    };

    Ok(ScenarioStep {
        id,
        text: raw.text,
        bullet: raw.bullet_type,
        effects: raw.effects,
        kind,
    })
}

// =============================================================================
// CampaignGuide
// =============================================================================

/// A validated campaign guide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignGuide {
    id: String,
    name: String,
    version: u32,
    catalog: LogCatalog,
    scenarios: Vec<Scenario>,
}

impl CampaignGuide {
    /// Validate a deserialized guide document.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for duplicate scenarios, steps or
    /// log definitions, for dangling step references, and for steps that
    /// declare conflicting shapes.
    pub fn from_document(document: GuideDocument) -> Result<Self, DomainError> {
        if document.id.trim().is_empty() {
            return Err(DomainError::validation("Guide id cannot be empty"));
        }

        let catalog = LogCatalog::from_definitions(document.log_entries)?;

        let mut seen = HashSet::new();
        let mut scenarios = Vec::with_capacity(document.scenarios.len());
        for raw in document.scenarios {
            let scenario = Scenario::from_raw(raw)?;
            if !seen.insert(scenario.id.clone()) {
                return Err(DomainError::validation(format!(
                    "Guide {} declares scenario {} twice",
                    document.id, scenario.id
                )));
            }
            scenarios.push(scenario);
        }

        Ok(Self {
            id: document.id,
            name: document.name,
            version: document.version,
            catalog,
            scenarios,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn catalog(&self) -> &LogCatalog {
        &self.catalog
    }

    /// Scenarios in the order the guide declares them.
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id.as_str() == id)
    }

    /// Every condition that loaded as unsupported, with where it lives.
    pub fn unsupported_conditions(&self) -> Vec<(&ScenarioId, &StepId, &str)> {
        self.scenarios
            .iter()
            .flat_map(|scenario| {
                scenario.steps().flat_map(move |step| {
                    step.branches().iter().filter_map(move |branch| {
                        match &branch.condition {
                            Condition::Unsupported { shape } => {
                                Some((&scenario.id, &step.id, shape.as_str()))
                            }
                            _ => None,
                        }
                    })
                })
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A small guide exercising every step and condition shape.
    pub const GATHERING_JSON: &str = r#"{
        "id": "night_of_the_zealot",
        "name": "Night of the Zealot",
        "version": 2,
        "log_entries": [
            {"section": "campaign_notes", "id": "house_burned", "type": "text",
             "text": "Your house has burned to the ground."},
            {"section": "campaign_notes", "id": "lita", "type": "card", "code": "01117",
             "text": "Lita Chantler"}
        ],
        "scenarios": [{
            "id": "the_gathering",
            "name": "The Gathering",
            "start": "intro",
            "steps": [
                {"id": "intro", "text": "Read the introduction.", "next": "check_house",
                 "effects": [{"type": "increment", "section": "cultists", "delta": 1}]},
                {"id": "check_house", "bullet_type": "small",
                 "branches": [
                    {"condition": {"type": "campaign_log", "section": "campaign_notes",
                                   "id": "house_burned"}, "next": "burned"},
                    {"condition": {"section": "cultists", "threshold": 3}, "next": "many_cultists"}
                 ],
                 "otherwise": "resolution_1"},
                {"id": "burned", "resolution": "R2"},
                {"id": "many_cultists", "resolution": "R3"},
                {"id": "resolution_1", "resolution": "R1",
                 "effects": [{"type": "record_entry", "section": "campaign_notes",
                              "entry": {"id": "lita", "type": "card", "code": "01117"}}]}
            ]
        }]
    }"#;

    pub fn gathering_guide() -> CampaignGuide {
        let document: GuideDocument = serde_json::from_str(GATHERING_JSON).unwrap();
        CampaignGuide::from_document(document).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    fn document(json: &str) -> GuideDocument {
        serde_json::from_str(json).unwrap()
    }

    mod loading {
        use super::*;

        #[test]
        fn loads_valid_guide() {
            let guide = gathering_guide();
            assert_eq!(guide.id(), "night_of_the_zealot");
            assert_eq!(guide.version(), 2);
            assert_eq!(guide.catalog().len(), 2);

            let scenario = guide.scenario("the_gathering").unwrap();
            assert_eq!(scenario.start().as_str(), "intro");
            assert_eq!(scenario.step_count(), 5);
            assert!(scenario.step("burned").unwrap().is_terminal());
            assert_eq!(scenario.step("check_house").unwrap().bullet, BulletType::Small);
            assert!(guide.unsupported_conditions().is_empty());
        }

        #[test]
        fn classifies_conditions_once() {
            let guide = gathering_guide();
            let step = guide
                .scenario("the_gathering")
                .unwrap()
                .step("check_house")
                .unwrap();
            assert!(matches!(
                step.branches()[0].condition,
                Condition::CampaignLog { expect: true, .. }
            ));
            assert!(matches!(
                step.branches()[1].condition,
                Condition::CampaignLogCount { threshold: 3, .. }
            ));
        }

        #[test]
        fn unsupported_conditions_still_load() {
            let guide = CampaignGuide::from_document(document(
                r#"{"id":"g","name":"G","scenarios":[{"id":"s","name":"S","start":"a","steps":[
                    {"id":"a","branches":[{"condition":{"type":"math"},"next":"b"}]},
                    {"id":"b"}
                ]}]}"#,
            ))
            .unwrap();
            let unsupported = guide.unsupported_conditions();
            assert_eq!(unsupported.len(), 1);
            assert_eq!(unsupported[0].1.as_str(), "a");
        }
    }

    mod validation {
        use super::*;

        fn load_err(json: &str) -> DomainError {
            CampaignGuide::from_document(document(json)).unwrap_err()
        }

        #[test]
        fn rejects_dangling_next() {
            let err = load_err(
                r#"{"id":"g","name":"G","scenarios":[{"id":"s","name":"S","start":"a","steps":[
                    {"id":"a","next":"nowhere"}
                ]}]}"#,
            );
            assert!(err.to_string().contains("unknown step nowhere"));
        }

        #[test]
        fn rejects_missing_start() {
            let err = load_err(
                r#"{"id":"g","name":"G","scenarios":[{"id":"s","name":"S","start":"zzz","steps":[
                    {"id":"a"}
                ]}]}"#,
            );
            assert!(err.to_string().contains("starts at unknown step"));
        }

        #[test]
        fn rejects_duplicate_steps() {
            let err = load_err(
                r#"{"id":"g","name":"G","scenarios":[{"id":"s","name":"S","start":"a","steps":[
                    {"id":"a"},{"id":"a"}
                ]}]}"#,
            );
            assert!(err.to_string().contains("declares step a twice"));
        }

        #[test]
        fn rejects_branches_with_resolution() {
            let err = load_err(
                r#"{"id":"g","name":"G","scenarios":[{"id":"s","name":"S","start":"a","steps":[
                    {"id":"a","resolution":"R1",
                     "branches":[{"condition":{"section":"x","id":"y"},"next":"a"}]}
                ]}]}"#,
            );
            assert!(err.to_string().contains("branches and a resolution"));
        }

        #[test]
        fn rejects_otherwise_without_branches() {
            let err = load_err(
                r#"{"id":"g","name":"G","scenarios":[{"id":"s","name":"S","start":"a","steps":[
                    {"id":"a","branches":[],"otherwise":"b"},
                    {"id":"b"}
                ]}]}"#,
            );
            assert!(err.to_string().contains("otherwise without branches"));
        }

        #[test]
        fn rejects_otherwise_alongside_next() {
            let err = load_err(
                r#"{"id":"g","name":"G","scenarios":[{"id":"s","name":"S","start":"a","steps":[
                    {"id":"a","next":"b","otherwise":"b"},
                    {"id":"b"}
                ]}]}"#,
            );
            assert!(err.to_string().contains("otherwise without branches"));
        }

        #[test]
        fn rejects_duplicate_scenarios() {
            let err = load_err(
                r#"{"id":"g","name":"G","scenarios":[
                    {"id":"s","name":"S","start":"a","steps":[{"id":"a"}]},
                    {"id":"s","name":"S2","start":"a","steps":[{"id":"a"}]}
                ]}"#,
            );
            assert!(err.to_string().contains("scenario s twice"));
        }

        #[test]
        fn rejects_duplicate_log_definitions() {
            let err = load_err(
                r#"{"id":"g","name":"G","log_entries":[
                    {"section":"n","id":"x","type":"text","text":"a"},
                    {"section":"n","id":"x","type":"text","text":"b"}
                ]}"#,
            );
            assert!(err.to_string().contains("Duplicate log entry definition n.x"));
        }
    }
}
