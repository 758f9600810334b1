//! Configuration types for the validation engine.

use serde::{Deserialize, Serialize};

/// Configuration for a [`Validator`](crate::Validator) instance.
///
/// Fixed at construction; a validator never mutates its configuration, which
/// is what makes concurrent `validate` calls lock-free.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Maximum input length in characters. Longer input is truncated to
    /// this prefix before scoring and flagged as `LengthExceeded`.
    pub max_length: usize,

    /// Strict mode accepts only `Safe` and `Low`; normal mode rejects only
    /// `High` and `Critical`. Use strict mode on security-sensitive
    /// surfaces where false positives are cheaper than misses.
    pub strict_mode: bool,

    /// Consecutive-character run length above which the repetition
    /// detector triggers.
    pub repetition_threshold: usize,

    /// Per-category score contributions.
    pub weights: CategoryWeights,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_length: 5000,
            strict_mode: false,
            repetition_threshold: 10,
            weights: CategoryWeights::default(),
        }
    }
}

impl ValidatorConfig {
    /// Default configuration with strict mode enabled.
    pub fn strict() -> Self {
        Self {
            strict_mode: true,
            ..Self::default()
        }
    }
}

/// Score contribution of each detection category.
///
/// The defaults are empirically tuned rather than derived, so they are
/// exposed here as plain fields instead of being baked into the scorer.
/// `Base64HiddenJailbreak` carries no weight of its own: the Base64 run
/// that triggered the deeper inspection already contributed through
/// `encoding`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWeights {
    /// System prompt extraction attempts.
    pub prompt_leak: u32,
    /// Instruction override / persona hijack attempts.
    pub jailbreak: u32,
    /// Spoofed system framing tags.
    pub system_tag: u32,
    /// Literal dangerous keywords, per distinct keyword.
    pub dangerous_keyword: u32,
    /// Encoded payload shapes, per matching pattern.
    pub encoding: u32,
    /// Hidden-character obfuscation, per matching pattern.
    pub obfuscation: u32,
    /// Excessive character or token repetition.
    pub repetition: u32,
    /// Input truncated to `max_length`.
    pub length_exceeded: u32,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            prompt_leak: 3,
            jailbreak: 4,
            system_tag: 3,
            dangerous_keyword: 2,
            encoding: 2,
            obfuscation: 2,
            repetition: 1,
            length_exceeded: 1,
        }
    }
}
