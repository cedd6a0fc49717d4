//! Evaluation of a campaign guide against a campaign log
//!
//! Everything here is pure: evaluators borrow the guide and read a log
//! snapshot. Only [`StepInterpreter::enter`] and [`StepInterpreter::run`]
//! write to the log, by applying step effects.

mod condition_evaluator;
mod prompt;
mod step_interpreter;

pub use condition_evaluator::ConditionEvaluator;
pub use prompt::{StepPrompt, COMPLEX_BRANCH_PLACEHOLDER};
pub use step_interpreter::{Playthrough, PlaythroughEnd, StepInterpreter, Transition, TransitionKind};
