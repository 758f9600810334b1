//! # Decision & Sanitization Policy
//!
//! Maps an accumulated score to a [`ThreatLevel`], applies the validity
//! policy, produces a cleaned copy of accepted text, and selects the
//! user-facing refusal for rejected text.

use crate::models::ThreatLevel;
use crate::patterns::PatternRegistry;

/// Accepted input carries this message.
pub const MESSAGE_OK: &str = "OK";

/// Empty or whitespace-only input short-circuits the pipeline with this
/// message.
pub const MESSAGE_EMPTY: &str = "Empty input";

/// Bucket a score into a threat level. The buckets are fixed; tuning
/// happens on the weights side, not here.
pub fn level_for_score(score: u32) -> ThreatLevel {
    match score {
        0 => ThreatLevel::Safe,
        1..=2 => ThreatLevel::Low,
        3..=4 => ThreatLevel::Medium,
        5..=6 => ThreatLevel::High,
        _ => ThreatLevel::Critical,
    }
}

/// The validity policy.
///
/// Strict mode accepts only `Safe` and `Low`. Normal mode rejects only
/// `High` and `Critical`, tolerating `Medium` as noisy-but-probably-benign.
/// The asymmetry is intentional: strict mode is for security-sensitive
/// surfaces, and anything valid under strict mode is valid under normal
/// mode too.
pub fn is_valid(level: ThreatLevel, strict_mode: bool) -> bool {
    if strict_mode {
        level <= ThreatLevel::Low
    } else {
        level < ThreatLevel::High
    }
}

/// User-facing refusal text for a rejected input, selected purely from the
/// threat level.
pub fn rejection_message(level: ThreatLevel) -> &'static str {
    match level {
        ThreatLevel::Critical => {
            "This request cannot be processed under the system security policy."
        }
        ThreatLevel::High => {
            "This question format is not supported. Please ask about company analysis or investment topics."
        }
        // Only reachable for strict-mode rejections of Medium input.
        _ => "Please review your input and try again.",
    }
}

/// Produce the cleaned copy of accepted text.
///
/// Strips zero-width/format characters, strips HTML-tag-shaped substrings,
/// collapses runs of three or more whitespace characters to exactly two,
/// and trims. Tags are stripped before whitespace is collapsed so that a
/// removed tag cannot leave a fresh 3+ whitespace run behind, which makes
/// sanitization idempotent.
pub(crate) fn sanitize(registry: &PatternRegistry, text: &str) -> String {
    let text = registry.zero_width.replace_all(text, "");
    let text = registry.html_tag.replace_all(&text, "");
    let text = registry.extra_whitespace.replace_all(&text, "  ");
    text.trim().to_string()
}
