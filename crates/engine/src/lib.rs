//! Guidekeeper Engine library.
//!
//! Campaign playback on top of `guidekeeper-domain`: storage, guide loading
//! and the use cases that move a campaign through a guide.
//!
//! ## Structure
//!
//! - `entities/` - Entity modules wrapping repository ports
//! - `use_cases/` - User story orchestration across entities
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod entities;
pub mod infrastructure;
pub mod use_cases;

/// Test fixtures module for guide files under `test_data/`.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
