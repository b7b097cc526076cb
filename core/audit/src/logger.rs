//! Thread-safe, append-only hazard logger.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, error};

use crate::entry::{EventType, HazardEvent, HazardLogEntry};
use solace_common::{HazardCode, Severity};

/// Append-only audit trail of safety-relevant events.
///
/// A handle clones cheaply and shares the underlying store; construct
/// one explicitly and pass it to whichever callers record hazards.
/// Appends from concurrent callers lose no entries; per-caller append
/// order is preserved. There is no mutation or deletion API.
#[derive(Debug, Clone, Default)]
pub struct HazardLogger {
    entries: Arc<Mutex<Vec<HazardLogEntry>>>,
}

impl HazardLogger {
    /// Create a new empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event, assigning its id and timestamp.
    ///
    /// Ids are unix-millis plus a random suffix; uniqueness is
    /// best-effort, not cryptographically guaranteed. Events at
    /// [`Severity::Major`] or above additionally raise an out-of-band
    /// operational alert.
    pub fn log(&self, event: HazardEvent) -> HazardLogEntry {
        let timestamp = Utc::now();
        let id = format!(
            "{}-{:08x}",
            timestamp.timestamp_millis(),
            rand::rng().next_u32()
        );

        let entry = HazardLogEntry {
            id,
            timestamp,
            event_type: event.event_type,
            severity: event.severity,
            context_snapshot: event.context_snapshot,
            action_taken: event.action_taken,
            outcome: event.outcome,
            hazard_ids: event.hazard_ids,
        };

        self.entries.lock().unwrap().push(entry.clone());

        if entry.severity >= Severity::Major {
            error!(
                id = %entry.id,
                event = ?entry.event_type,
                severity = ?entry.severity,
                "hazard recorded, operator attention required"
            );
        } else {
            debug!(id = %entry.id, event = ?entry.event_type, "hazard recorded");
        }

        entry
    }

    /// Record a crisis detection.
    ///
    /// Serializes the indicators and ambient context to a JSON
    /// snapshot and appends a [`Severity::Major`] entry with an
    /// `escalated` outcome and hazard code `HAZ-002`.
    pub fn log_crisis_detection(
        &self,
        indicators: &[String],
        context: &impl Serialize,
        action_taken: &str,
    ) -> HazardLogEntry {
        #[derive(Serialize)]
        struct Snapshot<'a, C: Serialize> {
            indicators: &'a [String],
            context: &'a C,
        }

        let context_snapshot =
            serde_json::to_string(&Snapshot { indicators, context })
                .unwrap_or_else(|_| "<unserializable context>".to_string());

        self.log(HazardEvent {
            event_type: EventType::CrisisDetected,
            severity: Severity::Major,
            context_snapshot,
            action_taken: action_taken.to_string(),
            outcome: "escalated".to_string(),
            hazard_ids: vec![HazardCode::CrisisIndicators],
        })
    }

    /// Snapshot of all entries in insertion order.
    pub fn entries(&self) -> Vec<HazardLogEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn event(outcome: &str) -> HazardEvent {
        HazardEvent {
            event_type: EventType::ResponseRedacted,
            severity: Severity::Moderate,
            context_snapshot: "{}".to_string(),
            action_taken: "redacted".to_string(),
            outcome: outcome.to_string(),
            hazard_ids: vec![HazardCode::ClinicalLanguage],
        }
    }

    #[test]
    fn test_entries_in_insertion_order_with_distinct_ids() {
        let logger = HazardLogger::new();
        for i in 0..10 {
            logger.log(event(&format!("outcome-{}", i)));
        }

        let entries = logger.entries();
        assert_eq!(entries.len(), 10);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.outcome, format!("outcome-{}", i));
        }

        let ids: HashSet<_> = entries.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_log_returns_stored_entry() {
        let logger = HazardLogger::new();
        let entry = logger.log(event("stored"));

        assert_eq!(logger.entries()[0].id, entry.id);
        assert_eq!(logger.len(), 1);
        assert!(!logger.is_empty());
    }

    #[test]
    fn test_log_crisis_detection_shape() {
        let logger = HazardLogger::new();
        let indicators = vec!["want to die".to_string(), "no point living".to_string()];
        let context = serde_json::json!({ "user": "a1b2" });

        let entry =
            logger.log_crisis_detection(&indicators, &context, "crisis pathway escalation");

        assert_eq!(entry.event_type, EventType::CrisisDetected);
        assert_eq!(entry.severity, Severity::Major);
        assert_eq!(entry.outcome, "escalated");
        assert_eq!(entry.hazard_ids, vec![HazardCode::CrisisIndicators]);
        assert!(entry.context_snapshot.contains("want to die"));
        assert!(entry.context_snapshot.contains("a1b2"));
    }

    #[test]
    fn test_clones_share_the_store() {
        let logger = HazardLogger::new();
        let other = logger.clone();

        logger.log(event("first"));
        other.log(event("second"));

        assert_eq!(logger.len(), 2);
        assert_eq!(other.len(), 2);
    }

    #[test]
    fn test_concurrent_appends_lose_nothing() {
        let logger = HazardLogger::new();
        let mut handles = Vec::new();

        for _ in 0..8 {
            let handle = logger.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..25 {
                    handle.log(event("concurrent"));
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        let entries = logger.entries();
        assert_eq!(entries.len(), 200);

        let ids: HashSet<_> = entries.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids.len(), 200);
    }
}
