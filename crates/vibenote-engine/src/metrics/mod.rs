//! Word, character, and reading-time statistics for a text snapshot.
//!
//! Pure functions over `&str`; every input, including empty text, produces a
//! defined numeric result.

use serde::{Deserialize, Serialize};

/// Average reading speed assumed when the caller doesn't supply one.
pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

/// Count words as runs of non-whitespace.
///
/// Empty and all-whitespace text count as zero words; leading and trailing
/// whitespace never produce empty tokens.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count Unicode scalar values. No normalization is applied.
pub fn count_characters(text: &str) -> usize {
    text.chars().count()
}

/// Estimated reading time in whole minutes, rounded up.
///
/// Zero words estimate to zero minutes. A rate of zero falls back to
/// [`DEFAULT_WORDS_PER_MINUTE`] instead of dividing by zero.
pub fn estimate_reading_time(text: &str, words_per_minute: usize) -> usize {
    let rate = if words_per_minute == 0 {
        DEFAULT_WORDS_PER_MINUTE
    } else {
        words_per_minute
    };
    count_words(text).div_ceil(rate)
}

/// The three numbers the editor's counter widget displays together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub words: usize,
    pub characters: usize,
    pub reading_minutes: usize,
}

impl TextStats {
    /// Stats for `text` at the default reading rate.
    pub fn of(text: &str) -> Self {
        let words = count_words(text);
        Self {
            words,
            characters: count_characters(text),
            reading_minutes: words.div_ceil(DEFAULT_WORDS_PER_MINUTE),
        }
    }
}
