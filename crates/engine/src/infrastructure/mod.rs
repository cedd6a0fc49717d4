//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod config;
pub mod guide_loader;
pub mod persistence;
pub mod ports;
