//! Composition of the safety components around caller I/O.
//!
//! Calling code (chat handler, journal handler) wraps this pipeline
//! around its own persistence and transport: seal before storing, open
//! after retrieving, screen AI output before display, screen user
//! input on submission. The components never call each other; this is
//! the only integration point.

use tracing::debug;

use solace_audit::{EventType, HazardEvent, HazardLogger};
use solace_common::{Result, Severity, UserId};
use solace_crypto::{EncryptedBlob, EncryptionCodec};
use solace_safety::{
    CrisisAssessment, CrisisDetector, SafetyCheckResult, SafetyFilter, SuggestedAction,
};

use crate::config::PipelineConfig;

/// The safety and privacy pipeline.
///
/// Encryption, response filtering, crisis detection, and the audit
/// trail behind one handle. Everything except the audit trail is
/// stateless; the handle is safe to share across request handlers.
pub struct SafetyPipeline {
    codec: EncryptionCodec,
    filter: SafetyFilter,
    detector: CrisisDetector,
    hazards: HazardLogger,
}

impl SafetyPipeline {
    /// Build a pipeline from a validated configuration, with a fresh
    /// audit trail.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            codec: EncryptionCodec::new(config.master_key, config.kdf_params),
            filter: SafetyFilter::new(),
            detector: CrisisDetector::new(),
            hazards: HazardLogger::new(),
        }
    }

    /// Share an existing audit trail instead of the private one.
    pub fn with_hazard_log(mut self, hazards: HazardLogger) -> Self {
        self.hazards = hazards;
        self
    }

    /// The audit trail handle.
    pub fn hazards(&self) -> &HazardLogger {
        &self.hazards
    }

    /// Seal a sensitive field before it is persisted.
    pub fn seal_field(&self, plaintext: &str, user: &UserId) -> Result<EncryptedBlob> {
        self.codec.encrypt(plaintext, user)
    }

    /// Open a sealed field after retrieval.
    ///
    /// A failure is recorded in the audit trail before the generic
    /// error is returned; the snapshot names the user, never the blob
    /// or its contents.
    pub fn open_field(&self, blob: &EncryptedBlob, user: &UserId) -> Result<String> {
        self.codec.decrypt(blob, user).inspect_err(|_| {
            self.hazards.log(HazardEvent {
                event_type: EventType::DecryptionFailed,
                severity: Severity::Moderate,
                context_snapshot: serde_json::json!({ "user": user.as_str() }).to_string(),
                action_taken: "content withheld".to_string(),
                outcome: "rejected".to_string(),
                hazard_ids: Vec::new(),
            });
        })
    }

    /// Screen an AI-generated response immediately before display.
    ///
    /// Callers must display `safe_text`, never the raw input. A failed
    /// check is recorded with the blocked reasons as its snapshot.
    pub fn screen_response(&self, text: &str) -> SafetyCheckResult {
        let result = self.filter.check_response_safety(text);

        if !result.passed {
            self.hazards.log(HazardEvent {
                event_type: EventType::ResponseRedacted,
                severity: Severity::Moderate,
                context_snapshot: serde_json::json!({ "reasons": result.blocked_reasons })
                    .to_string(),
                action_taken: "response redacted before display".to_string(),
                outcome: "redacted".to_string(),
                hazard_ids: result.hazard_ids.clone(),
            });
        } else {
            debug!(crisis = result.crisis_detected, "response screened");
        }

        result
    }

    /// Screen a user-authored message or journal entry.
    ///
    /// Any non-normal assessment is recorded in the audit trail; the
    /// caller drives the external UI pathway transition from the
    /// returned assessment.
    pub fn screen_user_input(&self, text: &str, user: &UserId) -> CrisisAssessment {
        let assessment = self.detector.assess_user_input(text);

        if assessment.suggested_action != SuggestedAction::Normal {
            let action = if assessment.suggested_action == SuggestedAction::Emergency {
                "crisis pathway escalation"
            } else {
                "support resources suggested"
            };
            let context = serde_json::json!({ "user": user.as_str() });
            self.hazards
                .log_crisis_detection(&assessment.indicators, &context, action);
        }

        assessment
    }
}
