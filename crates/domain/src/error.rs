//! Unified error types for the domain layer
//!
//! `DomainError` covers failures that stop an operation (guide validation,
//! malformed keys, unknown steps). Condition evaluation never fails; its
//! non-fatal problems are reported as [`ConditionDiagnostic`] instead.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// Use this when guide data or a value object breaks an invariant:
    /// - Required keys are empty
    /// - Step references point nowhere
    /// - A step declares conflicting shapes
    ///
    /// # Example
    /// ```ignore
    /// if steps.is_empty() {
    ///     return Err(DomainError::validation("Scenario has no steps"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

/// Non-fatal problems found while evaluating a condition.
///
/// These are rendered as placeholders by the presentation layer and never
/// propagate as failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConditionDiagnostic {
    /// The condition names a log entry the guide does not define.
    #[error("Unknown campaign log {section}.{id}")]
    UnknownLogEntry { section: String, id: String },

    /// The guide condition could not be classified at load time.
    #[error("Unsupported condition shape: {shape}")]
    UnsupportedConditionShape { shape: String },
}

impl ConditionDiagnostic {
    pub fn unknown_entry(section: impl Into<String>, id: impl Into<String>) -> Self {
        Self::UnknownLogEntry {
            section: section.into(),
            id: id.into(),
        }
    }

    pub fn unsupported(shape: impl Into<String>) -> Self {
        Self::UnsupportedConditionShape {
            shape: shape.into(),
        }
    }
}
