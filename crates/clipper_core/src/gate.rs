use std::sync::LazyLock;

use regex::Regex;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[\w’']+\b").expect("word pattern"));

/// Counts word-like tokens: alphanumeric runs, apostrophes included.
pub fn word_count(text: &str) -> usize {
    WORD.find_iter(text).count()
}

/// Minimum-content-length acceptance filter, applied identically to HTML-
/// and PDF-derived text after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityGate {
    min_words: usize,
}

impl QualityGate {
    pub fn new(min_words: usize) -> Self {
        Self { min_words }
    }

    pub fn accept(&self, content: &str) -> bool {
        word_count(content) >= self.min_words
    }

    pub fn min_words(&self) -> usize {
        self.min_words
    }
}
