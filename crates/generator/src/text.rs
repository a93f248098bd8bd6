//! Custom text checks and word filtering.
//!
//! Validation runs before any analyzer call. Filtering runs on the words the
//! analyzer returns, before they become tiles.

use std::collections::HashSet;

use tracing::warn;

use crate::error::GenerationError;
use crate::types::{RhymeType, MIN_DISTINCT_ENDINGS, MIN_TEXT_CHARS, MIN_TEXT_WORDS};

/// Articles, pronouns, conjunctions and other words that make poor tiles
const FUNCTION_WORDS: &[&str] = &[
    "the", "and", "but", "for", "nor", "yet", "are", "was", "were", "has", "had", "have", "his",
    "her", "hers", "its", "our", "ours", "you", "your", "yours", "she", "him", "they", "them",
    "their", "theirs", "this", "that", "these", "those", "who", "whom", "whose", "which", "what",
    "with", "from", "into", "onto", "than", "then", "when", "where", "while", "because", "although",
    "though", "unless", "until", "whether", "also", "not", "can", "will", "would", "could",
    "should", "shall", "may", "might", "must", "been", "being", "there", "here", "some", "any",
    "each", "every", "all", "both", "either", "neither", "such", "very", "just", "only", "about",
];

/// Validated custom text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedText {
    /// Input with surrounding whitespace removed
    pub text: String,
    /// Words longer than two letters
    pub word_count: usize,
    /// Distinct two-letter word endings
    pub distinct_endings: usize,
    /// Too few distinct endings to expect good rhyme groups
    pub low_confidence: bool,
}

/// Strip edge punctuation from a token
fn bare(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Check custom text before it is sent for analysis.
///
/// Text is trimmed first. It must have at least 20 characters and 10 words
/// longer than two letters. Fewer than 3 distinct word endings only marks the
/// result as low confidence.
pub fn validate_custom_text(raw: &str) -> Result<CheckedText, GenerationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(GenerationError::invalid_text("text is empty"));
    }

    let chars = text.chars().count();
    if chars < MIN_TEXT_CHARS {
        return Err(GenerationError::invalid_text(format!(
            "text has {} characters, at least {} are required",
            chars, MIN_TEXT_CHARS
        )));
    }

    let words: Vec<&str> = text
        .split_whitespace()
        .map(bare)
        .filter(|w| w.chars().count() > 2)
        .collect();
    if words.len() < MIN_TEXT_WORDS {
        return Err(GenerationError::invalid_text(format!(
            "text has {} words longer than two letters, at least {} are required",
            words.len(),
            MIN_TEXT_WORDS
        )));
    }

    let endings: HashSet<String> = words
        .iter()
        .filter_map(|w| ending(&w.to_lowercase(), 2))
        .collect();
    let low_confidence = endings.len() < MIN_DISTINCT_ENDINGS;
    if low_confidence {
        warn!(
            distinct_endings = endings.len(),
            word_count = words.len(),
            "custom text has few distinct word endings, rhyme groups may be weak"
        );
    }

    Ok(CheckedText {
        text: text.to_string(),
        word_count: words.len(),
        distinct_endings: endings.len(),
        low_confidence,
    })
}

/// Last `n` characters of a word, or `None` if it is shorter
fn ending(word: &str, n: usize) -> Option<String> {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < n {
        return None;
    }
    Some(chars[chars.len() - n..].iter().collect())
}

pub fn is_function_word(word: &str) -> bool {
    FUNCTION_WORDS.contains(&word)
}

/// Normalise a word returned by the analyzer into a tile word.
///
/// Returns `None` for function words and tokens that are short or not
/// purely alphabetic.
pub fn usable_word(raw: &str) -> Option<String> {
    let word = bare(raw).to_lowercase();
    if word.chars().count() <= 2 {
        return None;
    }
    if !word.chars().all(|c| c.is_alphabetic()) {
        return None;
    }
    if is_function_word(&word) {
        return None;
    }
    Some(word)
}

/// Filter and deduplicate a word list, keeping first-seen order
pub fn usable_words<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for w in raw {
        if let Some(word) = usable_word(w.as_ref()) {
            if !out.contains(&word) {
                out.push(word);
            }
        }
    }
    out
}

/// Classify a word set: exact when all members share their final three
/// letters (the whole word when shorter), otherwise slant.
pub fn classify_rhyme<S: AsRef<str>>(words: &[S]) -> RhymeType {
    let tails: Vec<String> = words
        .iter()
        .map(|w| {
            let w = w.as_ref();
            ending(w, 3).unwrap_or_else(|| w.to_string())
        })
        .collect();
    match tails.split_first() {
        Some((first, rest)) if rest.iter().all(|t| t == first) => RhymeType::Exact,
        _ => RhymeType::Slant,
    }
}

/// Pattern label for a group without one: `-` plus the shared two-letter ending
pub fn derived_pattern<S: AsRef<str>>(words: &[S]) -> String {
    words
        .first()
        .and_then(|w| ending(w.as_ref(), 2))
        .map(|e| format!("-{}", e))
        .unwrap_or_else(|| "-".to_string())
}
