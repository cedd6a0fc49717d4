//! ScenarioStep entity - one node of a scenario's step graph

use serde::{Deserialize, Serialize};

use crate::entities::campaign_log::LogEffect;
use crate::entities::condition::Condition;
use crate::value_objects::{BulletType, StepId};

/// A condition and the step it leads to when it evaluates true
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub condition: Condition,
    pub next: StepId,
}

/// What happens after a step has been entered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    /// Evaluate `branches` in order; the first true one wins.
    Branch {
        branches: Vec<Branch>,
        /// Followed only when every branch resolved false.
        otherwise: Option<StepId>,
    },
    /// Unconditionally continue to `next`.
    Linear { next: StepId },
    /// End of the scenario.
    Terminal { resolution: Option<String> },
}

/// A node in a scenario's branching script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioStep {
    pub id: StepId,
    /// Display template; `None` means the prompt is derived from the condition.
    pub text: Option<String>,
    pub bullet: BulletType,
    /// Log mutations applied when the step is entered
    pub effects: Vec<LogEffect>,
    pub kind: StepKind,
}

impl ScenarioStep {
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, StepKind::Terminal { .. })
    }

    pub fn branches(&self) -> &[Branch] {
        match &self.kind {
            StepKind::Branch { branches, .. } => branches,
            _ => &[],
        }
    }

    /// Every step id this step can lead to.
    pub fn successors(&self) -> Vec<&StepId> {
        match &self.kind {
            StepKind::Branch {
                branches,
                otherwise,
            } => branches
                .iter()
                .map(|b| &b.next)
                .chain(otherwise.iter())
                .collect(),
            StepKind::Linear { next } => vec![next],
            StepKind::Terminal { .. } => Vec::new(),
        }
    }
}
