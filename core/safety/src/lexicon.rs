//! Clinical lexicons and their precompiled matchers.
//!
//! Both lexicons use case-insensitive, boundary-free substring
//! matching: a phrase occurring inside an unrelated longer word still
//! matches. That limitation is pinned by tests; word-boundary matching
//! would change observable behavior.

use regex::{Regex, RegexSet};
use std::sync::LazyLock;

/// Marker substituted for every occurrence of a banned phrase.
pub const REDACTION_MARKER: &str = "[content removed]";

/// Clinical anti-pattern phrases that must never reach a user, paired
/// with the category recorded in the audit reason.
pub const BANNED_CLINICAL_PHRASES: &[(&str, &str)] = &[
    // Dismissive language
    ("just calm down", "dismissive language"),
    ("just relax", "dismissive language"),
    ("snap out of it", "dismissive language"),
    ("it's all in your head", "dismissive language"),
    ("just think positive", "dismissive language"),
    ("others have it worse", "dismissive language"),
    ("you're overreacting", "dismissive language"),
    // Unsolicited diagnostic claims
    ("you have depression", "diagnostic claim"),
    ("you have anxiety", "diagnostic claim"),
    ("you have ptsd", "diagnostic claim"),
    ("you are bipolar", "diagnostic claim"),
    ("i can diagnose", "diagnostic claim"),
    ("you suffer from", "diagnostic claim"),
    // Medication directives
    ("you should take medication", "medication directive"),
    ("stop taking your medication", "medication directive"),
    ("you need medication", "medication directive"),
    ("increase your dose", "medication directive"),
];

/// Phrases associated with self-harm or suicidal ideation.
pub const CRISIS_INDICATORS: &[&str] = &[
    "want to die",
    "kill myself",
    "end my life",
    "suicide",
    "suicidal",
    "self harm",
    "self-harm",
    "hurt myself",
    "harm myself",
    "no point living",
    "no reason to live",
    "better off dead",
    "better off without me",
    "end it all",
    "can't go on",
];

/// One banned phrase with its compiled matcher.
pub struct BannedPhrase {
    pub phrase: &'static str,
    pub category: &'static str,
    pub pattern: Regex,
}

fn ci_literal(phrase: &str) -> Regex {
    Regex::new(&format!("(?i){}", regex::escape(phrase))).unwrap()
}

static BANNED: LazyLock<Vec<BannedPhrase>> = LazyLock::new(|| {
    BANNED_CLINICAL_PHRASES
        .iter()
        .map(|&(phrase, category)| BannedPhrase {
            phrase,
            category,
            pattern: ci_literal(phrase),
        })
        .collect()
});

static CRISIS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    CRISIS_INDICATORS
        .iter()
        .map(|&phrase| (phrase, ci_literal(phrase)))
        .collect()
});

static CRISIS_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(
        CRISIS_INDICATORS
            .iter()
            .map(|phrase| format!("(?i){}", regex::escape(phrase))),
    )
    .unwrap()
});

/// Banned clinical phrases with compiled matchers.
pub(crate) fn banned_phrases() -> &'static [BannedPhrase] {
    &BANNED
}

/// Crisis indicators with per-phrase matchers, for exhaustive scans.
pub(crate) fn crisis_indicators() -> &'static [(&'static str, Regex)] {
    &CRISIS
}

/// Crisis indicators as one set, for boolean early-exit scans.
pub(crate) fn crisis_set() -> &'static RegexSet {
    &CRISIS_SET
}
