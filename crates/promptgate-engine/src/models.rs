//! # Core Types for the Validation Engine
//!
//! This module defines the data types shared by every stage of the
//! validation pipeline: threat severity buckets, the detection taxonomy,
//! and the per-call result record.
//!
//! ## Design Principles
//!
//! 1. **Closed taxonomy** - every detection maps to a [`DetectionCategory`]
//!    variant, so downstream `match` arms are exhaustively checked.
//! 2. **Bounded evidence** - a [`Detection`] carries at most
//!    [`MAX_EVIDENCE_CHARS`] characters of the matched text, never the full
//!    payload, so audit logs cannot be used to exfiltrate input.
//! 3. **Serializable** - all value types derive Serde for logging and audit
//!    trails.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of characters of matched text retained as evidence.
///
/// Evidence snippets end up in audit logs. Keeping them short means a
/// rejected payload can never be reconstructed from the log stream.
pub const MAX_EVIDENCE_CHARS: usize = 30;

/// Threat severity, ordered from harmless to certainly hostile.
///
/// The ordering is load-bearing: score bucketing produces a level, and the
/// validity policy compares levels, so `Safe < Low < Medium < High <
/// Critical` must hold under `Ord`.
///
/// | Level | Score range | Normal mode | Strict mode |
/// |----------|-------------|-------------|-------------|
/// | Safe     | 0           | valid       | valid       |
/// | Low      | 1-2         | valid       | valid       |
/// | Medium   | 3-4         | valid       | rejected    |
/// | High     | 5-6         | rejected    | rejected    |
/// | Critical | 7+          | rejected    | rejected    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    /// No detections at all.
    Safe,
    /// Weak signals only (length overflow, repetition).
    Low,
    /// At least one real pattern family triggered.
    Medium,
    /// Multiple families, or a single high-weight family plus noise.
    High,
    /// Combined attack, e.g. instruction override plus prompt extraction.
    Critical,
}

/// The families of attack the engine can recognize.
///
/// Each variant corresponds to one scan stage of the threat scorer. The
/// per-family score contributions live in
/// [`CategoryWeights`](crate::config::CategoryWeights) so deployments can
/// retune them without forking the pattern set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionCategory {
    /// System prompt extraction attempt ("reveal your system prompt").
    PromptLeak,
    /// Instruction override or persona hijack ("ignore all previous
    /// instructions", DAN, developer mode).
    Jailbreak,
    /// Spoofed system/assistant framing tags (`[SYSTEM]`, `<|im_start|>`).
    SystemTagSpoof,
    /// Literal keyword associated with command or SQL injection.
    DangerousKeyword,
    /// Encoded payload shapes: long Base64 runs, hex/unicode escapes,
    /// HTML entities.
    EncodingBypass,
    /// Zero-width characters or combining-mark runs used to hide content.
    Obfuscation,
    /// Low-information flooding (repeated characters or tokens).
    ExcessiveRepetition,
    /// Input longer than the configured maximum; scoring ran on the
    /// truncated prefix.
    LengthExceeded,
    /// A Base64 run decoded to text matching the jailbreak pattern set.
    /// Carries no weight of its own; the triggering Base64 run already
    /// contributed through `EncodingBypass`.
    Base64HiddenJailbreak,
}

impl DetectionCategory {
    /// Stable snake_case label, used in logs and the CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PromptLeak => "prompt_leak",
            Self::Jailbreak => "jailbreak",
            Self::SystemTagSpoof => "system_tag_spoof",
            Self::DangerousKeyword => "dangerous_keyword",
            Self::EncodingBypass => "encoding_bypass",
            Self::Obfuscation => "obfuscation",
            Self::ExcessiveRepetition => "excessive_repetition",
            Self::LengthExceeded => "length_exceeded",
            Self::Base64HiddenJailbreak => "base64_hidden_jailbreak",
        }
    }
}

impl std::fmt::Display for DetectionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One triggered category together with a bounded evidence snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Which attack family triggered.
    pub category: DetectionCategory,
    /// At most [`MAX_EVIDENCE_CHARS`] characters of the matched text, the
    /// matched keyword, or a fixed label for non-regex checks.
    pub evidence: String,
}

impl Detection {
    /// Build a detection, truncating `evidence` to the bounded snippet
    /// length on a character boundary.
    pub fn new(category: DetectionCategory, evidence: &str) -> Self {
        Self {
            category,
            evidence: truncate_evidence(evidence),
        }
    }
}

impl std::fmt::Display for Detection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.category, self.evidence)
    }
}

/// Truncate matched text to [`MAX_EVIDENCE_CHARS`] characters.
pub(crate) fn truncate_evidence(text: &str) -> String {
    text.chars().take(MAX_EVIDENCE_CHARS).collect()
}

/// The outcome of one `validate` call.
///
/// Exactly one of these is produced per call; there is no partial or
/// error-shaped outcome for hostile input, since detection is the intended
/// result rather than a failure.
///
/// # Invariants
///
/// - `sanitized_input` is non-empty only when `is_valid` is true. Rejected
///   input is never echoed back, sanitized or otherwise.
/// - `detections` is empty exactly when `threat_level` is
///   [`ThreatLevel::Safe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the caller may forward the (sanitized) input downstream.
    pub is_valid: bool,
    /// Severity bucket derived from the accumulated score.
    pub threat_level: ThreatLevel,
    /// Cleaned copy of the input when valid, empty string otherwise.
    pub sanitized_input: String,
    /// Every triggered category in detection order, with bounded evidence.
    pub detections: Vec<Detection>,
    /// `"OK"` for accepted input, a user-facing refusal otherwise.
    pub message: String,
}

impl ValidationResult {
    /// True when no category triggered at all.
    #[inline]
    pub fn is_safe(&self) -> bool {
        self.threat_level == ThreatLevel::Safe
    }

    /// True when the given category is among the detections.
    pub fn detected(&self, category: DetectionCategory) -> bool {
        self.detections.iter().any(|d| d.category == category)
    }
}

/// Construction-time failure of the validation engine.
///
/// The pattern set is static and trusted, so a compile failure means the
/// build itself is broken. Callers should treat this as fatal and refuse
/// to start rather than degrade to an unvalidated pipeline.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// A detection or sanitizer pattern failed to compile.
    #[error("pattern registry failed to compile: {0}")]
    Pattern(#[from] regex::Error),
}
