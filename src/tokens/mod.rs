//! Heuristic token estimation
//!
//! Approximates sub-word tokenization cost from raw text without pulling in a
//! tokenizer. Hangul syllables, Latin word runs, digit runs, and punctuation
//! each carry a fixed weight; the weighted sum is rounded up. Callers must
//! treat the result as an estimate, not an exact token count.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HANGUL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[가-힣]").unwrap());
static LATIN_WORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z]+").unwrap());
static NUMBER_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.,!?;:()]").unwrap());

const HANGUL_WEIGHT: f64 = 2.5;
const WORD_WEIGHT: f64 = 1.3;
const NUMBER_WEIGHT: f64 = 1.0;
const PUNCTUATION_WEIGHT: f64 = 0.5;

/// Raw counts feeding the weighted estimate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBreakdown {
    /// Hangul syllable characters
    pub hangul_chars: usize,
    /// Maximal runs of Latin letters
    pub latin_words: usize,
    /// Maximal runs of digits
    pub number_runs: usize,
    /// Individual punctuation characters among `. , ! ? ; : ( )`
    pub punctuation: usize,
}

impl TokenBreakdown {
    pub fn of(text: &str) -> Self {
        Self {
            hangul_chars: HANGUL.find_iter(text).count(),
            latin_words: LATIN_WORDS.find_iter(text).count(),
            number_runs: NUMBER_RUNS.find_iter(text).count(),
            punctuation: PUNCTUATION.find_iter(text).count(),
        }
    }

    /// Weighted sum, rounded up to a whole token count
    pub fn estimate(&self) -> u32 {
        let weighted = self.hangul_chars as f64 * HANGUL_WEIGHT
            + self.latin_words as f64 * WORD_WEIGHT
            + self.number_runs as f64 * NUMBER_WEIGHT
            + self.punctuation as f64 * PUNCTUATION_WEIGHT;
        weighted.ceil() as u32
    }
}

/// Estimate the token count of `text`. Empty input yields 0.
pub fn estimate(text: &str) -> u32 {
    if text.is_empty() {
        return 0;
    }
    TokenBreakdown::of(text).estimate()
}
