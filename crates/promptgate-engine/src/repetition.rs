//! # Repetition Detector
//!
//! Flags low-information flooding: inputs that repeat one character or one
//! token over and over. These carry no lexical attack signature, but they
//! are a classic confusion/DoS shape against LLM front ends, so they add a
//! small score contribution of their own.

use std::collections::HashMap;

/// True when `text` repeats a single character more than `threshold` times
/// consecutively, or when one whitespace-separated token makes up more than
/// half of a message of more than five tokens. Either trigger alone is
/// sufficient.
pub fn has_excessive_repetition(text: &str, threshold: usize) -> bool {
    // Character runs. The regex crate has no backreferences, so this is a
    // plain run-length walk.
    let mut run = 0usize;
    let mut previous = None;
    for c in text.chars() {
        if previous == Some(c) {
            run += 1;
        } else {
            run = 1;
            previous = Some(c);
        }
        if run > threshold {
            return true;
        }
    }

    // Token dominance.
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() > 5 {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in tokens.iter().copied() {
            *counts.entry(token).or_insert(0) += 1;
        }
        if let Some(&max) = counts.values().max() {
            if max * 2 > tokens.len() {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: usize = 10;

    #[test]
    fn test_normal_text_passes() {
        assert!(!has_excessive_repetition(
            "Tell me about Tesla's financial statements",
            THRESHOLD
        ));
    }

    #[test]
    fn test_character_run_triggers() {
        let text = format!("Tell me about AAPL{}", "!".repeat(100));
        assert!(has_excessive_repetition(&text, THRESHOLD));
    }

    #[test]
    fn test_run_at_threshold_passes() {
        // Exactly `threshold` consecutive chars is still allowed.
        let text = "a".repeat(THRESHOLD);
        assert!(!has_excessive_repetition(&text, THRESHOLD));
    }

    #[test]
    fn test_run_just_over_threshold_triggers() {
        let text = "a".repeat(THRESHOLD + 1);
        assert!(has_excessive_repetition(&text, THRESHOLD));
    }

    #[test]
    fn test_dominant_token_triggers() {
        assert!(has_excessive_repetition(
            "spam spam spam spam spam stop",
            THRESHOLD
        ));
    }

    #[test]
    fn test_five_tokens_or_fewer_not_checked() {
        // Token dominance only applies to messages of more than 5 tokens.
        assert!(!has_excessive_repetition("go go go go go", THRESHOLD));
    }

    #[test]
    fn test_balanced_tokens_pass() {
        assert!(!has_excessive_repetition(
            "one two three four five six seven",
            THRESHOLD
        ));
    }

    #[test]
    fn test_multibyte_runs_counted_by_char() {
        let text = "하".repeat(THRESHOLD + 1);
        assert!(has_excessive_repetition(&text, THRESHOLD));
    }
}
