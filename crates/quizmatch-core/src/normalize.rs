//! Answer text normalization.
//!
//! Turns raw answer text into an ordered token sequence: lowercase, ASCII
//! punctuation deleted, split into words, stopwords dropped. Token order is
//! kept because surname matching depends on it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Function words ignored when comparing answers.
///
/// Deliberately much smaller than a general-purpose stopword list: words
/// like "who" or "first" can be the answer.
pub const STOPWORDS: &[&str] = &[
    "the", "a", "an", "of", "in", "on", "at", "to", "for", "and", "or", "by", "with",
];

/// Returns `true` if `token` is one of [`STOPWORDS`].
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

// ---------------------------------------------------------------------------
// Tokenizers
// ---------------------------------------------------------------------------

/// Splits lowercased, punctuation-free text into raw tokens.
pub trait Tokenizer: Send + Sync + fmt::Debug {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Splits on every single space character.
///
/// Runs of spaces and leading/trailing spaces produce empty tokens, and an
/// empty input produces one empty token. Those survive normalization since
/// the empty string is not a stopword.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleSpaceTokenizer;

impl Tokenizer for SingleSpaceTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split(' ').collect()
    }
}

/// Splits on runs of any Unicode whitespace. Never yields empty tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_whitespace().collect()
    }
}

/// Which tokenizer a [`Normalizer`] uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    #[default]
    SingleSpace,
    Whitespace,
}

impl SplitMode {
    fn tokenizer(self) -> Box<dyn Tokenizer> {
        match self {
            SplitMode::SingleSpace => Box::new(SingleSpaceTokenizer),
            SplitMode::Whitespace => Box::new(WhitespaceTokenizer),
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitMode::SingleSpace => write!(f, "single_space"),
            SplitMode::Whitespace => write!(f, "whitespace"),
        }
    }
}

impl FromStr for SplitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single_space" | "single-space" => Ok(SplitMode::SingleSpace),
            "whitespace" => Ok(SplitMode::Whitespace),
            other => Err(format!("unknown split mode: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Normalizes answer text into comparable tokens.
#[derive(Debug)]
pub struct Normalizer {
    tokenizer: Box<dyn Tokenizer>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(SplitMode::default())
    }
}

impl Normalizer {
    pub fn new(mode: SplitMode) -> Self {
        Self {
            tokenizer: mode.tokenizer(),
        }
    }

    /// Use a custom tokenizer.
    pub fn with_tokenizer(tokenizer: Box<dyn Tokenizer>) -> Self {
        Self { tokenizer }
    }

    /// Normalize `text` into its token sequence.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let stripped: String = lowered
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();

        self.tokenizer
            .tokenize(&stripped)
            .into_iter()
            .map(|token| token.replace(' ', ""))
            .filter(|token| !is_stopword(token))
            .collect()
    }

    /// Re-join normalized tokens with single spaces.
    pub fn join(tokens: &[String]) -> String {
        tokens.join(" ")
    }
}

/// Normalize with the default single-space tokenizer.
pub fn normalize(text: &str) -> Vec<String> {
    Normalizer::default().normalize(text)
}
