//! The validator facade.
//!
//! [`Validator`] ties the pipeline together: length clamp, category scans,
//! repetition check, score aggregation, level derivation, validity
//! decision, then sanitize-or-reject. Every call is a pure, synchronous
//! pass over the immutable registry; nothing persists between calls.

use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::config::ValidatorConfig;
use crate::models::{ThreatLevel, ValidationResult, ValidatorError};
use crate::patterns::PatternRegistry;
use crate::policy;
use crate::scorer;

/// The input-validation engine.
///
/// Construct one per process (or per distinct configuration) and share it
/// by reference; `validate` takes `&self` and the registry is immutable,
/// so concurrent calls from any number of threads need no locking.
///
/// # Example
///
/// ```rust
/// use promptgate_engine::{Validator, ValidatorConfig};
///
/// let validator = Validator::new(ValidatorConfig::default()).unwrap();
/// let result = validator.validate("What was Apple's revenue last year?");
/// assert!(result.is_valid);
/// ```
pub struct Validator {
    config: ValidatorConfig,
    registry: PatternRegistry,
}

impl Validator {
    /// Build a validator with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError::Pattern`] if the built-in pattern set
    /// fails to compile. The patterns are static, so this only happens
    /// when the build itself is broken; callers should treat it as fatal.
    pub fn new(config: ValidatorConfig) -> Result<Self, ValidatorError> {
        let registry = PatternRegistry::compile()?;
        debug!(
            max_length = config.max_length,
            strict_mode = config.strict_mode,
            "validator initialized"
        );
        Ok(Self { config, registry })
    }

    /// A process-wide shared instance with the default configuration.
    ///
    /// Built exactly once on first use. Prefer constructing and passing a
    /// [`Validator`] explicitly; this accessor exists for callers that
    /// need one read-only instance across many tasks without threading a
    /// handle through every layer.
    pub fn shared() -> &'static Validator {
        static SHARED: OnceLock<Validator> = OnceLock::new();
        SHARED.get_or_init(|| {
            Validator::new(ValidatorConfig::default())
                .expect("built-in pattern set must compile")
        })
    }

    /// The configuration this validator was built with.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate one input.
    ///
    /// Always returns a [`ValidationResult`]; hostile input is a result,
    /// not an error. When `is_valid` is false the caller must not forward
    /// the input (or any derivative of it) downstream, and
    /// `sanitized_input` is empty.
    pub fn validate(&self, input: &str) -> ValidationResult {
        if input.trim().is_empty() {
            return ValidationResult {
                is_valid: true,
                threat_level: ThreatLevel::Safe,
                sanitized_input: String::new(),
                detections: Vec::new(),
                message: policy::MESSAGE_EMPTY.to_string(),
            };
        }

        let clamped = scorer::clamp_length(input, self.config.max_length);
        let truncated = clamped.len() < input.len();
        let (score, detections) = scorer::score(&self.registry, &self.config, &clamped, truncated);

        let threat_level = policy::level_for_score(score);
        let is_valid = policy::is_valid(threat_level, self.config.strict_mode);

        if !detections.is_empty() {
            // Bounded evidence only; raw input never reaches the log.
            warn!(
                ?threat_level,
                score,
                detections = ?detections.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "injection patterns detected"
            );
        }

        let sanitized_input = if is_valid {
            policy::sanitize(&self.registry, &clamped)
        } else {
            String::new()
        };
        let message = if is_valid {
            policy::MESSAGE_OK.to_string()
        } else {
            policy::rejection_message(threat_level).to_string()
        };

        ValidationResult {
            is_valid,
            threat_level,
            sanitized_input,
            detections,
            message,
        }
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
