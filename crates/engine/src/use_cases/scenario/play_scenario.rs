//! Scenario playback - moves a campaign through a guide's step graph.
//!
//! Every mutation is persisted before the next one is made: entering a step
//! saves the new position, then each of the step's effects is applied and
//! saved in turn.

use std::sync::Arc;

use guidekeeper_domain::{
    Campaign, CampaignGuide, CampaignId, DomainError, Playthrough, PlaythroughEnd, Scenario,
    ScenarioId, ScenarioPosition, ScenarioStep, StepId, StepInterpreter, StepPrompt, Transition,
    TransitionKind,
};

use crate::entities::Campaigns;
use crate::infrastructure::ports::{ClockPort, RepoError};

/// The step a campaign is on, rendered for the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub scenario: ScenarioId,
    pub step: StepId,
    pub prompt: StepPrompt,
}

/// Result of [`PlayScenario::advance`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceOutcome {
    pub transition: Transition,
    /// Where the campaign is now. `None` once the scenario is complete.
    pub current: Option<StepView>,
}

#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error("Campaign {0} is not in a scenario")]
    NotStarted(CampaignId),
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),
    #[error("Campaign {campaign_id} follows guide {expected}, not {loaded}")]
    GuideMismatch {
        campaign_id: CampaignId,
        expected: String,
        loaded: String,
    },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Plays scenarios of one loaded guide.
pub struct PlayScenario {
    campaigns: Arc<Campaigns>,
    guide: Arc<CampaignGuide>,
    clock: Arc<dyn ClockPort>,
}

impl PlayScenario {
    pub fn new(
        campaigns: Arc<Campaigns>,
        guide: Arc<CampaignGuide>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            campaigns,
            guide,
            clock,
        }
    }

    pub fn guide(&self) -> &CampaignGuide {
        &self.guide
    }

    /// Position the campaign at a scenario's start step and enter it.
    pub async fn start(
        &self,
        campaign_id: CampaignId,
        scenario_id: &str,
    ) -> Result<StepView, PlayError> {
        let mut campaign = self.load(campaign_id).await?;
        let scenario = self.scenario(scenario_id)?;
        let interpreter = StepInterpreter::new(&self.guide, scenario);
        let step = interpreter.step(scenario.start().as_str())?;

        self.enter(&mut campaign, scenario, step).await?;

        tracing::info!(
            campaign_id = %campaign_id,
            scenario = %scenario.id(),
            step = %step.id,
            "Started scenario"
        );
        Ok(self.view(&campaign, scenario, step))
    }

    /// Leave the current step.
    ///
    /// On `Advance` the next step is entered. On `Complete` the campaign
    /// leaves the scenario. `Ambiguous` and `DeadEnd` leave the campaign
    /// where it is.
    pub async fn advance(&self, campaign_id: CampaignId) -> Result<AdvanceOutcome, PlayError> {
        let mut campaign = self.load(campaign_id).await?;
        let position = campaign
            .position()
            .cloned()
            .ok_or(PlayError::NotStarted(campaign_id))?;
        let scenario = self.scenario(position.scenario.as_str())?;
        let interpreter = StepInterpreter::new(&self.guide, scenario);

        let transition = interpreter.transition(position.step.as_str(), campaign.log())?;
        tracing::debug!(
            campaign_id = %campaign_id,
            scenario = %position.scenario,
            step = %position.step,
            transition = ?TransitionKind::from(&transition),
            "Computed transition"
        );

        let current = match &transition {
            Transition::Advance { next } => {
                let step = interpreter.step(next.as_str())?;
                self.enter(&mut campaign, scenario, step).await?;
                Some(self.view(&campaign, scenario, step))
            }
            Transition::Complete { resolution } => {
                campaign.clear_position(self.clock.now());
                self.campaigns.save(&campaign).await?;
                tracing::info!(
                    campaign_id = %campaign_id,
                    scenario = %position.scenario,
                    resolution = resolution.as_deref().unwrap_or("none"),
                    "Completed scenario"
                );
                None
            }
            Transition::Ambiguous { diagnostics } => {
                let messages: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
                tracing::warn!(
                    campaign_id = %campaign_id,
                    step = %position.step,
                    diagnostics = ?messages,
                    "No branch resolved true and some could not be evaluated"
                );
                let step = interpreter.step(position.step.as_str())?;
                Some(self.view(&campaign, scenario, step))
            }
            Transition::DeadEnd => {
                tracing::warn!(
                    campaign_id = %campaign_id,
                    step = %position.step,
                    "Every branch was false and the step has no fallback"
                );
                let step = interpreter.step(position.step.as_str())?;
                Some(self.view(&campaign, scenario, step))
            }
        };

        Ok(AdvanceOutcome {
            transition,
            current,
        })
    }

    /// Render the campaign's current step.
    pub async fn prompt(&self, campaign_id: CampaignId) -> Result<StepView, PlayError> {
        let campaign = self.load(campaign_id).await?;
        let position = campaign
            .position()
            .ok_or(PlayError::NotStarted(campaign_id))?;
        let scenario = self.scenario(position.scenario.as_str())?;
        let step = StepInterpreter::new(&self.guide, scenario).step(position.step.as_str())?;
        Ok(self.view(&campaign, scenario, step))
    }

    /// Start a scenario and keep advancing until it stops on its own or
    /// `step_limit` steps have been entered.
    pub async fn play(
        &self,
        campaign_id: CampaignId,
        scenario_id: &str,
        step_limit: usize,
    ) -> Result<Playthrough, PlayError> {
        if step_limit == 0 {
            return Ok(Playthrough {
                visited: Vec::new(),
                end: PlaythroughEnd::StepLimitReached,
            });
        }

        let first = self.start(campaign_id, scenario_id).await?;
        log_prompt(campaign_id, &first);
        let mut visited = vec![first.step];

        while visited.len() < step_limit {
            let outcome = self.advance(campaign_id).await?;
            match (outcome.transition, outcome.current) {
                (Transition::Advance { next }, Some(view)) => {
                    log_prompt(campaign_id, &view);
                    visited.push(next);
                }
                (stopped, _) => {
                    return Ok(Playthrough {
                        visited,
                        end: PlaythroughEnd::Stopped(stopped),
                    })
                }
            }
        }

        tracing::warn!(
            campaign_id = %campaign_id,
            scenario = %scenario_id,
            step_limit,
            "Step limit reached"
        );
        Ok(Playthrough {
            visited,
            end: PlaythroughEnd::StepLimitReached,
        })
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn load(&self, campaign_id: CampaignId) -> Result<Campaign, PlayError> {
        let campaign = self.campaigns.require(campaign_id).await?;
        if campaign.guide_id() != self.guide.id() {
            return Err(PlayError::GuideMismatch {
                campaign_id,
                expected: campaign.guide_id().to_string(),
                loaded: self.guide.id().to_string(),
            });
        }
        Ok(campaign)
    }

    fn scenario(&self, scenario_id: &str) -> Result<&Scenario, PlayError> {
        self.guide
            .scenario(scenario_id)
            .ok_or_else(|| PlayError::UnknownScenario(scenario_id.to_string()))
    }

    async fn enter(
        &self,
        campaign: &mut Campaign,
        scenario: &Scenario,
        step: &ScenarioStep,
    ) -> Result<(), PlayError> {
        campaign.move_to(
            ScenarioPosition::new(scenario.id().clone(), step.id.clone()),
            self.clock.now(),
        );
        self.campaigns.save(campaign).await?;

        for effect in &step.effects {
            campaign.apply_effect(effect, self.clock.now());
            self.campaigns.save(campaign).await?;
            tracing::debug!(
                campaign_id = %campaign.id(),
                step = %step.id,
                section = %effect.section(),
                effect = %effect.description(),
                "Applied log effect"
            );
        }
        Ok(())
    }

    fn view(&self, campaign: &Campaign, scenario: &Scenario, step: &ScenarioStep) -> StepView {
        StepView {
            scenario: scenario.id().clone(),
            step: step.id.clone(),
            prompt: StepPrompt::for_step(step, self.guide.catalog(), campaign.log()),
        }
    }
}

fn log_prompt(campaign_id: CampaignId, view: &StepView) {
    tracing::info!(
        campaign_id = %campaign_id,
        step = %view.step,
        prompt = %view.prompt.display(),
        "Step prompt"
    );
}
