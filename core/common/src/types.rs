//! Shared types used throughout the Solace safety core.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an application user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId from a string.
    ///
    /// # Preconditions
    /// - `id` must be non-empty
    ///
    /// # Errors
    /// - Returns error if id is empty
    pub fn new(id: impl Into<String>) -> crate::Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(crate::Error::InvalidInput(
                "UserId cannot be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity grade of a recorded hazard.
///
/// Ordered: `Minor < Moderate < Major < Catastrophic`. Entries at
/// `Major` or above additionally raise an operational alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Moderate,
    Major,
    Catastrophic,
}

/// Stable identifier of a clinical-safety rule, used for audit
/// correlation across systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardCode {
    /// AI-generated content contained prohibited clinical phrasing.
    #[serde(rename = "HAZ-001")]
    ClinicalLanguage,
    /// Text contained crisis indicators.
    #[serde(rename = "HAZ-002")]
    CrisisIndicators,
}

impl HazardCode {
    /// The stable wire form of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            HazardCode::ClinicalLanguage => "HAZ-001",
            HazardCode::CrisisIndicators => "HAZ-002",
        }
    }
}

impl fmt::Display for HazardCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
