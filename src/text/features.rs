// Stylometric feature extraction — coarse statistical descriptors of
// writing style, consumed only by the risk classifier.
//
// The field order is fixed and must match the order used at training time:
// any change here invalidates every persisted classifier model.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Number of features in the vector. Persisted models depend on this.
pub const FEATURE_COUNT: usize = 6;

fn sentence_breaks() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").unwrap())
}

fn punctuation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.,!?;:]").unwrap())
}

/// Fixed-order stylometric feature vector for one document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Whitespace-delimited token count
    pub word_count: usize,
    /// Character count of the normalized text
    pub char_count: usize,
    /// Segments produced by splitting on runs of `. ! ?`
    pub sentence_count: usize,
    /// Mean token length. NaN when there are no words — callers must guard
    /// with `is_finite` before handing the vector to the classifier.
    pub avg_word_length: f64,
    /// Distinct tokens / word count (0.0 for empty text)
    pub vocabulary_richness: f64,
    /// Punctuation characters / char count (0.0 for empty text)
    pub punctuation_density: f64,
}

impl FeatureVector {
    /// Extract features from already-normalized text.
    pub fn extract(normalized: &str) -> Self {
        let words: Vec<&str> = normalized.split_whitespace().collect();
        let word_count = words.len();
        let char_count = normalized.chars().count();
        let sentence_count = sentence_breaks().split(normalized).count();

        let total_word_len: usize = words.iter().map(|w| w.chars().count()).sum();
        // 0.0 / 0.0 = NaN for empty text, matching the undefined mean
        let avg_word_length = total_word_len as f64 / word_count as f64;

        let unique_words: HashSet<&str> = words.iter().copied().collect();
        let vocabulary_richness = if word_count > 0 {
            unique_words.len() as f64 / word_count as f64
        } else {
            0.0
        };

        let punctuation_count = punctuation().find_iter(normalized).count();
        let punctuation_density = if char_count > 0 {
            punctuation_count as f64 / char_count as f64
        } else {
            0.0
        };

        Self {
            word_count,
            char_count,
            sentence_count,
            avg_word_length,
            vocabulary_richness,
            punctuation_density,
        }
    }

    /// The vector in training-time order.
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.word_count as f64,
            self.char_count as f64,
            self.sentence_count as f64,
            self.avg_word_length,
            self.vocabulary_richness,
            self.punctuation_density,
        ]
    }

    /// Whether every feature is a finite number. False for zero-word text,
    /// whose `avg_word_length` is NaN.
    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite())
    }
}
