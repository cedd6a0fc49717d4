//! Validated name and key newtypes
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for name and key fields
const MAX_NAME_LENGTH: usize = 200;

fn validated(kind: &str, value: String) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", kind)));
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "{} cannot exceed {} characters",
            kind, MAX_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

/// Guide keys share one shape: a trimmed, non-empty string used as a map key.
macro_rules! define_key {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// # Errors
            ///
            /// Returns `DomainError::Validation` if the value is empty after
            /// trimming or longer than 200 characters.
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                validated($kind, value.into()).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = DomainError;

            fn try_from(s: &str) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_key!(
    /// Name of a campaign log section (e.g. `campaign_notes`, `cultists_interrogated`)
    SectionName,
    "Section name"
);
define_key!(
    /// Identifier of an entry within a log section
    EntryId,
    "Entry id"
);
define_key!(
    /// Identifier of a step within a scenario
    StepId,
    "Step id"
);
define_key!(
    /// Identifier of a scenario within a guide
    ScenarioId,
    "Scenario id"
);
define_key!(
    /// A card code from the card database (e.g. `01117`)
    CardCode,
    "Card code"
);

// ============================================================================
// CampaignName
// ============================================================================

/// A validated campaign name (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CampaignName(String);

impl CampaignName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        validated("Campaign name", name.into()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CampaignName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CampaignName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CampaignName> for String {
    fn from(name: CampaignName) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_trimmed() {
        let section = SectionName::new("  campaign_notes ").unwrap();
        assert_eq!(section.as_str(), "campaign_notes");
    }

    #[test]
    fn empty_keys_are_rejected() {
        let err = StepId::new("   ").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Step id cannot be empty");
    }

    #[test]
    fn overlong_campaign_name_is_rejected() {
        let err = CampaignName::new("x".repeat(201)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn keys_deserialize_through_validation() {
        let code: CardCode = serde_json::from_str("\"01117\"").unwrap();
        assert_eq!(code.as_str(), "01117");

        let bad: Result<CardCode, _> = serde_json::from_str("\"\"");
        assert!(bad.is_err());
    }
}
