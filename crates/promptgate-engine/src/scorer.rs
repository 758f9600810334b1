//! # Threat Scorer
//!
//! Applies the pattern registry to one input and accumulates a weighted
//! score across every detection category. All stages always run in a fixed
//! order; there is no short-circuiting, so a single input can collect
//! contributions from several families at once. Each distinct pattern or
//! keyword contributes once, however many times it matches.

use std::borrow::Cow;

use regex::Regex;
use tracing::warn;

use crate::config::ValidatorConfig;
use crate::encoded;
use crate::models::{Detection, DetectionCategory};
use crate::patterns::PatternRegistry;
use crate::repetition;

/// Clamp input to at most `max_length` characters.
///
/// Returns a borrowed slice of the original string when it already fits,
/// so the common path allocates nothing.
pub(crate) fn clamp_length(input: &str, max_length: usize) -> Cow<'_, str> {
    match input.char_indices().nth(max_length) {
        Some((byte_offset, _)) => Cow::Borrowed(&input[..byte_offset]),
        None => Cow::Borrowed(input),
    }
}

/// Score `text` against the full rule set.
///
/// `text` must already be clamped via [`clamp_length`]; `truncated` records
/// whether clamping shortened the original input. Returns the accumulated
/// score and every triggered category in detection order.
pub(crate) fn score(
    registry: &PatternRegistry,
    config: &ValidatorConfig,
    text: &str,
    truncated: bool,
) -> (u32, Vec<Detection>) {
    let weights = &config.weights;
    let mut total = 0u32;
    let mut detections = Vec::new();

    // 1. Length. Scoring below only ever sees the truncated prefix.
    if truncated {
        warn!(max_length = config.max_length, "input exceeds max length, truncated");
        detections.push(Detection::new(
            DetectionCategory::LengthExceeded,
            "input truncated",
        ));
        total += weights.length_exceeded;
    }

    // 2-4. Linguistic pattern families.
    total += scan_family(
        &registry.prompt_leak,
        DetectionCategory::PromptLeak,
        weights.prompt_leak,
        text,
        &mut detections,
    );
    total += scan_family(
        &registry.jailbreak,
        DetectionCategory::Jailbreak,
        weights.jailbreak,
        text,
        &mut detections,
    );
    total += scan_family(
        &registry.system_tag,
        DetectionCategory::SystemTagSpoof,
        weights.system_tag,
        text,
        &mut detections,
    );

    // 5. Dangerous keywords: case-insensitive substring search, one
    // contribution per distinct keyword.
    let lowered = text.to_lowercase();
    for keyword in registry.keywords {
        if lowered.contains(&keyword.to_lowercase()) {
            detections.push(Detection::new(DetectionCategory::DangerousKeyword, keyword));
            total += weights.dangerous_keyword;
        }
    }

    // 6. Encoding shapes. A Base64-shaped run additionally hands the whole
    // text to the encoded-payload inspector.
    if let Some(hit) = registry.base64_run.find(text) {
        detections.push(Detection::new(
            DetectionCategory::EncodingBypass,
            hit.as_str(),
        ));
        total += weights.encoding;
        if let Some(hidden) = encoded::inspect_base64(registry, text) {
            detections.push(hidden);
        }
    }
    total += scan_family(
        &registry.encoding,
        DetectionCategory::EncodingBypass,
        weights.encoding,
        text,
        &mut detections,
    );

    // 7. Hidden-character obfuscation. The match itself is invisible
    // characters, so the evidence is a fixed label rather than the match.
    for pattern in &registry.obfuscation {
        if pattern.is_match(text) {
            detections.push(Detection::new(
                DetectionCategory::Obfuscation,
                "hidden characters",
            ));
            total += weights.obfuscation;
        }
    }

    // 8. Repetition flooding.
    if repetition::has_excessive_repetition(text, config.repetition_threshold) {
        detections.push(Detection::new(
            DetectionCategory::ExcessiveRepetition,
            "repetitive input",
        ));
        total += weights.repetition;
    }

    (total, detections)
}

/// Run one regex family, recording the first match of each pattern that
/// fires. Returns the family's score contribution.
fn scan_family(
    family: &[Regex],
    category: DetectionCategory,
    weight: u32,
    text: &str,
    detections: &mut Vec<Detection>,
) -> u32 {
    let mut contribution = 0;
    for pattern in family {
        if let Some(hit) = pattern.find(text) {
            detections.push(Detection::new(category, hit.as_str()));
            contribution += weight;
        }
    }
    contribution
}
