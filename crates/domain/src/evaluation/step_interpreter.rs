//! Step interpreter - walks a scenario's step graph
//!
//! States are step ids. Entering a step applies its effects to the log;
//! [`StepInterpreter::transition`] then decides where to go next without
//! touching the log.

use serde::{Deserialize, Serialize};

use crate::entities::{
    CampaignGuide, CampaignLog, ConditionResult, Scenario, ScenarioStep, StepKind,
};
use crate::error::{ConditionDiagnostic, DomainError};
use crate::evaluation::ConditionEvaluator;
use crate::value_objects::StepId;

/// Result of leaving a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Continue to another step of the same scenario.
    Advance { next: StepId },
    /// The step was terminal; the scenario is over.
    Complete { resolution: Option<String> },
    /// No branch was true and at least one could not be evaluated.
    /// `otherwise` is not followed.
    Ambiguous {
        diagnostics: Vec<ConditionDiagnostic>,
    },
    /// Every branch was false and there is no `otherwise`.
    DeadEnd,
}

impl Transition {
    pub fn next_step(&self) -> Option<&StepId> {
        match self {
            Transition::Advance { next } => Some(next),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Transition::Complete { .. })
    }
}

/// How an automatic run stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaythroughEnd {
    /// A non-advancing transition.
    Stopped(Transition),
    /// The step limit was hit before the run stopped on its own.
    StepLimitReached,
}

/// Report of [`StepInterpreter::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playthrough {
    pub visited: Vec<StepId>,
    pub end: PlaythroughEnd,
}

impl Playthrough {
    /// The resolution reached, if the run completed the scenario.
    pub fn resolution(&self) -> Option<&str> {
        match &self.end {
            PlaythroughEnd::Stopped(Transition::Complete { resolution }) => resolution.as_deref(),
            _ => None,
        }
    }
}

/// Interprets one scenario of a guide
#[derive(Debug, Clone, Copy)]
pub struct StepInterpreter<'a> {
    scenario: &'a Scenario,
    evaluator: ConditionEvaluator<'a>,
}

impl<'a> StepInterpreter<'a> {
    pub fn new(guide: &'a CampaignGuide, scenario: &'a Scenario) -> Self {
        Self {
            scenario,
            evaluator: ConditionEvaluator::new(guide.catalog()),
        }
    }

    /// Look a scenario up by id.
    pub fn for_scenario(guide: &'a CampaignGuide, scenario_id: &str) -> Result<Self, DomainError> {
        let scenario = guide
            .scenario(scenario_id)
            .ok_or_else(|| DomainError::not_found("Scenario", scenario_id))?;
        Ok(Self::new(guide, scenario))
    }

    pub fn scenario(&self) -> &'a Scenario {
        self.scenario
    }

    pub fn step(&self, step_id: &str) -> Result<&'a ScenarioStep, DomainError> {
        self.scenario
            .step(step_id)
            .ok_or_else(|| DomainError::not_found("ScenarioStep", step_id))
    }

    /// Enter a step: apply its effects to the log and return it.
    pub fn enter(&self, step_id: &str, log: &mut CampaignLog) -> Result<&'a ScenarioStep, DomainError> {
        let step = self.step(step_id)?;
        for effect in &step.effects {
            log.apply_effect(effect);
        }
        Ok(step)
    }

    /// Decide where to go after `step_id` given the current log.
    pub fn transition(&self, step_id: &str, log: &CampaignLog) -> Result<Transition, DomainError> {
        let step = self.step(step_id)?;
        Ok(self.transition_from(step, log))
    }

    pub fn transition_from(&self, step: &ScenarioStep, log: &CampaignLog) -> Transition {
        match &step.kind {
            StepKind::Linear { next } => Transition::Advance { next: next.clone() },
            StepKind::Terminal { resolution } => Transition::Complete {
                resolution: resolution.clone(),
            },
            StepKind::Branch {
                branches,
                otherwise,
            } => {
                let mut diagnostics = Vec::new();
                for branch in branches {
                    match self.evaluator.evaluate(&branch.condition, log) {
                        ConditionResult::True => {
                            return Transition::Advance {
                                next: branch.next.clone(),
                            }
                        }
                        ConditionResult::False => {}
                        ConditionResult::Unresolved(diagnostic) => diagnostics.push(diagnostic),
                    }
                }

                if !diagnostics.is_empty() {
                    return Transition::Ambiguous { diagnostics };
                }
                match otherwise {
                    Some(next) => Transition::Advance { next: next.clone() },
                    None => Transition::DeadEnd,
                }
            }
        }
    }

    /// Play the scenario from its start step until it stops advancing.
    ///
    /// `step_limit` bounds the number of steps entered, guarding against
    /// cyclic guides.
    pub fn run(&self, log: &mut CampaignLog, step_limit: usize) -> Result<Playthrough, DomainError> {
        let mut visited = Vec::new();
        let mut current = self.scenario.start().clone();

        while visited.len() < step_limit {
            let step = self.enter(current.as_str(), log)?;
            visited.push(current.clone());

            match self.transition_from(step, log) {
                Transition::Advance { next } => current = next,
                stopped => {
                    return Ok(Playthrough {
                        visited,
                        end: PlaythroughEnd::Stopped(stopped),
                    })
                }
            }
        }

        Ok(Playthrough {
            visited,
            end: PlaythroughEnd::StepLimitReached,
        })
    }
}

/// Serializable summary of a transition, for logs and persisted history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Advance,
    Complete,
    Ambiguous,
    DeadEnd,
}

impl From<&Transition> for TransitionKind {
    fn from(transition: &Transition) -> Self {
        match transition {
            Transition::Advance { .. } => TransitionKind::Advance,
            Transition::Complete { .. } => TransitionKind::Complete,
            Transition::Ambiguous { .. } => TransitionKind::Ambiguous,
            Transition::DeadEnd => TransitionKind::DeadEnd,
        }
    }
}
