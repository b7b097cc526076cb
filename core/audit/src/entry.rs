//! Audit-trail record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use solace_common::{HazardCode, Severity};

/// Category of a safety-relevant event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Crisis indicators found in user-authored text.
    CrisisDetected,
    /// An AI response was redacted before display.
    ResponseRedacted,
    /// A sealed field failed authenticated decryption.
    DecryptionFailed,
}

/// A safety-relevant event to be recorded.
///
/// The logger assigns `id` and `timestamp` at append time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardEvent {
    pub event_type: EventType,
    pub severity: Severity,
    /// Serialized snapshot of the ambient context. Never contains
    /// plaintext content or key material.
    pub context_snapshot: String,
    pub action_taken: String,
    pub outcome: String,
    pub hazard_ids: Vec<HazardCode>,
}

/// One immutable record in the append-only audit trail.
///
/// Created only by the logger; never mutated or deleted, retained
/// indefinitely for audit purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: EventType,
    pub severity: Severity,
    pub context_snapshot: String,
    pub action_taken: String,
    pub outcome: String,
    pub hazard_ids: Vec<HazardCode>,
}
