//! Offline given-name gazetteer.
//!
//! A cheap stand-in for a statistical model: text that contains a known
//! given name as a whole word is reported as a single person entity
//! spanning the entire text. Good enough for "Albert Einstein"-style
//! answers, useless for surname-only or unusual names.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;

use quizmatch_core::error::RecognizerError;
use quizmatch_core::traits::{Entity, EntityLabel, EntityRecognizer};

/// Given names used when no list is configured.
pub const DEFAULT_GIVEN_NAMES: &[&str] = &[
    "ada", "agatha", "albert", "alexander", "amelia", "barack", "charles", "charlotte",
    "claude", "elizabeth", "emily", "ernest", "frida", "george", "isaac", "jane", "johann",
    "john", "leonardo", "ludwig", "marie", "mark", "martin", "mary", "michael", "napoleon",
    "neil", "nelson", "nikola", "oscar", "pablo", "rosa", "thomas", "vincent", "virginia",
    "william", "winston", "wolfgang",
];

/// Recognizer that tags text as a person when it contains a known given name.
#[derive(Debug, Clone)]
pub struct GazetteerRecognizer {
    given_names: HashSet<String>,
}

impl Default for GazetteerRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_GIVEN_NAMES.iter().copied())
    }
}

impl GazetteerRecognizer {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            given_names: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// Number of known given names.
    pub fn len(&self) -> usize {
        self.given_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.given_names.is_empty()
    }

    fn contains_given_name(&self, text: &str) -> bool {
        text.split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
            .any(|word| self.given_names.contains(&word.to_lowercase()))
    }
}

/// Read a newline-delimited name list. Blank lines and `#` comments are ignored.
pub fn read_names_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read names file: {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

#[async_trait]
impl EntityRecognizer for GazetteerRecognizer {
    fn name(&self) -> &str {
        "gazetteer"
    }

    async fn extract(&self, text: &str) -> Result<Vec<Entity>, RecognizerError> {
        if self.contains_given_name(text) {
            Ok(vec![Entity::whole(text, EntityLabel::Person)])
        } else {
            Ok(vec![])
        }
    }

    async fn health_check(&self) -> Result<(), RecognizerError> {
        if self.is_empty() {
            return Err(RecognizerError::Unavailable(
                "gazetteer has no given names".into(),
            ));
        }
        Ok(())
    }
}
