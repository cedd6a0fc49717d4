//! Scenario playback use cases.

mod play_scenario;

pub use play_scenario::{AdvanceOutcome, PlayError, PlayScenario, StepView};
