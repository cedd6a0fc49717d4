//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate has a unique identity, owns its constituent parts and
//! exposes behavior through methods rather than public fields. Mutations take
//! the current time from the caller so the engine's clock stays injectable.

pub mod campaign;

pub use campaign::{Campaign, ScenarioPosition};
