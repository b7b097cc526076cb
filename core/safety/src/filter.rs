//! Last-line safety filter for AI-generated responses.
//!
//! Runs on every generated message immediately before display,
//! independent of whatever safeguards the generation side applies.

use serde::Serialize;
use tracing::warn;

use crate::lexicon::{banned_phrases, crisis_set, REDACTION_MARKER};
use solace_common::HazardCode;

/// Outcome of screening one AI-generated response.
#[derive(Debug, Clone, Serialize)]
pub struct SafetyCheckResult {
    /// True iff no banned phrase was found.
    pub passed: bool,
    /// True iff at least one redaction was applied.
    pub modified: bool,
    /// The unmodified input, present only when `modified` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    /// The text to display, with banned phrases redacted.
    pub safe_text: String,
    /// One reason per banned phrase found.
    pub blocked_reasons: Vec<String>,
    /// Hazard codes triggered by this response.
    pub hazard_ids: Vec<HazardCode>,
    /// True iff the response itself contains crisis language.
    ///
    /// Orthogonal to `passed`: a response can be clinically clean and
    /// still echo crisis content.
    pub crisis_detected: bool,
}

/// Scans AI-generated response text for clinically unsafe phrasing.
///
/// Stateless over the precompiled lexicons; safe to share across
/// threads without coordination.
#[derive(Debug, Default, Clone, Copy)]
pub struct SafetyFilter;

impl SafetyFilter {
    pub fn new() -> Self {
        Self
    }

    /// Check one response.
    ///
    /// Total function: every input, including empty or pathological
    /// text, produces a well-formed result.
    ///
    /// The banned-phrase pass is exhaustive and redacting; the crisis
    /// pass over the same input is a boolean early-exit. The two
    /// lexicon strategies are deliberately distinct (redaction policy
    /// vs. flag).
    pub fn check_response_safety(&self, text: &str) -> SafetyCheckResult {
        let mut safe_text = text.to_string();
        let mut blocked_reasons = Vec::new();
        let mut hazard_ids = Vec::new();

        // Phrases are detected against the original input so earlier
        // redactions cannot mask later phrases.
        for entry in banned_phrases() {
            if entry.pattern.is_match(text) {
                blocked_reasons.push(format!("{}: \"{}\"", entry.category, entry.phrase));
                safe_text = entry
                    .pattern
                    .replace_all(&safe_text, REDACTION_MARKER)
                    .into_owned();
            }
        }

        let modified = !blocked_reasons.is_empty();
        if modified {
            hazard_ids.push(HazardCode::ClinicalLanguage);
            warn!(
                reasons = blocked_reasons.len(),
                "AI response contained prohibited clinical phrasing"
            );
        }

        let crisis_detected = crisis_set().is_match(text);
        if crisis_detected {
            hazard_ids.push(HazardCode::CrisisIndicators);
        }

        SafetyCheckResult {
            passed: !modified,
            modified,
            original_text: modified.then(|| text.to_string()),
            safe_text,
            blocked_reasons,
            hazard_ids,
            crisis_detected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_response_passes() {
        let result = SafetyFilter::new()
            .check_response_safety("It sounds like today took a lot out of you.");

        assert!(result.passed);
        assert!(!result.modified);
        assert!(result.original_text.is_none());
        assert!(result.blocked_reasons.is_empty());
        assert!(result.hazard_ids.is_empty());
        assert!(!result.crisis_detected);
        assert_eq!(
            result.safe_text,
            "It sounds like today took a lot out of you."
        );
    }

    #[test]
    fn test_banned_phrase_is_redacted() {
        let result =
            SafetyFilter::new().check_response_safety("Just calm down, it will all work out");

        assert!(!result.passed);
        assert!(result.modified);
        assert_eq!(
            result.original_text.as_deref(),
            Some("Just calm down, it will all work out")
        );
        assert!(result.safe_text.contains(REDACTION_MARKER));
        assert!(!result.safe_text.to_lowercase().contains("just calm down"));
        assert!(result.hazard_ids.contains(&HazardCode::ClinicalLanguage));
        assert_eq!(result.blocked_reasons.len(), 1);
        assert!(result.blocked_reasons[0].contains("just calm down"));
    }

    #[test]
    fn test_mixed_case_phrase_is_caught() {
        let result = SafetyFilter::new().check_response_safety("JUST CALM DOWN and breathe.");

        assert!(!result.passed);
        assert!(result.safe_text.contains(REDACTION_MARKER));
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let result = SafetyFilter::new()
            .check_response_safety("Just calm down. Seriously, just calm down.");

        assert_eq!(result.blocked_reasons.len(), 1);
        assert_eq!(result.safe_text.matches(REDACTION_MARKER).count(), 2);
    }

    #[test]
    fn test_multiple_phrases_all_reported() {
        let result = SafetyFilter::new()
            .check_response_safety("You have depression. Just calm down and you need medication.");

        assert!(!result.passed);
        assert_eq!(result.blocked_reasons.len(), 3);
        // HAZ-001 appears once regardless of how many phrases matched.
        assert_eq!(
            result
                .hazard_ids
                .iter()
                .filter(|&&h| h == HazardCode::ClinicalLanguage)
                .count(),
            1
        );
    }

    #[test]
    fn test_crisis_content_is_flagged_without_redaction() {
        let result = SafetyFilter::new()
            .check_response_safety("You mentioned you want to die; I'm taking that seriously.");

        assert!(result.passed);
        assert!(!result.modified);
        assert!(result.crisis_detected);
        assert_eq!(result.hazard_ids, vec![HazardCode::CrisisIndicators]);
    }

    #[test]
    fn test_banned_and_crisis_are_orthogonal() {
        let result = SafetyFilter::new()
            .check_response_safety("Just calm down about wanting to end it all.");

        assert!(!result.passed);
        assert!(result.crisis_detected);
        assert_eq!(
            result.hazard_ids,
            vec![HazardCode::ClinicalLanguage, HazardCode::CrisisIndicators]
        );
    }

    #[test]
    fn test_empty_input() {
        let result = SafetyFilter::new().check_response_safety("");

        assert!(result.passed);
        assert_eq!(result.safe_text, "");
        assert!(!result.crisis_detected);
    }
}
