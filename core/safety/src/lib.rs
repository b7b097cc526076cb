//! Deterministic text-safety scanning for the Solace safety core.
//!
//! Two independent scanners over a shared clinical lexicon:
//! - [`SafetyFilter`] screens AI-generated responses and redacts
//!   clinically unsafe phrasing before display.
//! - [`CrisisDetector`] grades user-authored text by how many distinct
//!   crisis indicators it contains.
//!
//! Both are total functions over their input and hold no mutable
//! state.

pub mod crisis;
pub mod filter;
pub mod lexicon;

pub use crisis::{CrisisAssessment, CrisisDetector, SuggestedAction};
pub use filter::{SafetyCheckResult, SafetyFilter};
pub use lexicon::{BANNED_CLINICAL_PHRASES, CRISIS_INDICATORS, REDACTION_MARKER};
