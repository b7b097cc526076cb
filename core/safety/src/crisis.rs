//! Crisis detection over user-authored text.

use serde::{Deserialize, Serialize};

use crate::lexicon::crisis_indicators;

/// Graded escalation decision for one piece of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestedAction {
    /// No indicators found.
    Normal,
    /// A single indicator: contextual support nudge, not a full
    /// escalation, to limit alarm fatigue from one ambiguous phrase.
    Support,
    /// Compounding indicators justify direct crisis-resource
    /// escalation.
    Emergency,
}

/// Assessment of one user-authored message or journal entry.
#[derive(Debug, Clone, Serialize)]
pub struct CrisisAssessment {
    pub is_crisis: bool,
    /// Every distinct lexicon phrase found in the input.
    pub indicators: Vec<String>,
    pub suggested_action: SuggestedAction,
}

/// Scans user-authored text for self-harm and crisis language.
///
/// Unlike the response filter's boolean scan, this scan is exhaustive:
/// the escalation grade depends on how many distinct indicators
/// compound in one input.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrisisDetector;

impl CrisisDetector {
    pub fn new() -> Self {
        Self
    }

    /// Assess one user message. Total function; no error case.
    pub fn assess_user_input(&self, text: &str) -> CrisisAssessment {
        let indicators: Vec<String> = crisis_indicators()
            .iter()
            .filter(|(_, pattern)| pattern.is_match(text))
            .map(|(phrase, _)| (*phrase).to_string())
            .collect();

        let suggested_action = match indicators.len() {
            0 => SuggestedAction::Normal,
            1 => SuggestedAction::Support,
            _ => SuggestedAction::Emergency,
        };

        CrisisAssessment {
            is_crisis: !indicators.is_empty(),
            indicators,
            suggested_action,
        }
    }
}
