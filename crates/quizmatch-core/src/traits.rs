//! Named-entity recognition trait and the person classifier built on it.
//!
//! Recognizer backends live in the `quizmatch-ner` crate; the judge only
//! ever sees them through [`EntityRecognizer`].

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RecognizerError;

// ---------------------------------------------------------------------------
// Entity recognizer trait
// ---------------------------------------------------------------------------

/// Trait for named-entity recognition backends.
///
/// Implementations must be safe to share across concurrent judge calls.
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    /// Human-readable backend name (e.g. "http").
    fn name(&self) -> &str;

    /// Extract entities from `text`.
    async fn extract(&self, text: &str) -> Result<Vec<Entity>, RecognizerError>;

    /// Check that the backend is ready to answer. Called once at startup.
    async fn health_check(&self) -> Result<(), RecognizerError> {
        Ok(())
    }
}

/// A recognized entity span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// The entity text as it appears in the input.
    pub text: String,
    /// Entity type.
    pub label: EntityLabel,
    /// Char offset of the first char.
    pub start: usize,
    /// Char offset one past the last char.
    pub end: usize,
}

impl Entity {
    /// An entity spanning all of `text`.
    pub fn whole(text: &str, label: EntityLabel) -> Self {
        Self {
            text: text.to_string(),
            label,
            start: 0,
            end: text.chars().count(),
        }
    }
}

/// Entity types. Only [`EntityLabel::Person`] affects judging.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityLabel {
    Person,
    Organization,
    Location,
    Other(String),
}

impl EntityLabel {
    /// Map a backend tag (spaCy or CoNLL style) to a label.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_uppercase().as_str() {
            "PERSON" | "PER" => EntityLabel::Person,
            "ORG" => EntityLabel::Organization,
            "GPE" | "LOC" => EntityLabel::Location,
            _ => EntityLabel::Other(tag.to_string()),
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityLabel::Person => write!(f, "PERSON"),
            EntityLabel::Organization => write!(f, "ORG"),
            EntityLabel::Location => write!(f, "LOC"),
            EntityLabel::Other(tag) => write!(f, "{tag}"),
        }
    }
}

impl From<String> for EntityLabel {
    fn from(tag: String) -> Self {
        EntityLabel::from_tag(&tag)
    }
}

impl From<EntityLabel> for String {
    fn from(label: EntityLabel) -> Self {
        label.to_string()
    }
}

// ---------------------------------------------------------------------------
// Person classifier
// ---------------------------------------------------------------------------

/// Answers "is this text a person's name?" using an injected recognizer.
#[derive(Clone)]
pub struct PersonClassifier {
    recognizer: Arc<dyn EntityRecognizer>,
}

impl PersonClassifier {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Name of the underlying recognizer backend.
    pub fn backend(&self) -> &str {
        self.recognizer.name()
    }

    /// Returns `true` if any entity found in `text` is a person.
    ///
    /// Blank text has no entities and is answered without consulting the
    /// recognizer. Recognizer failures are returned, never read as `false`.
    pub async fn is_person(&self, text: &str) -> Result<bool, RecognizerError> {
        if text.trim().is_empty() {
            return Ok(false);
        }
        let entities = self.recognizer.extract(text).await?;
        Ok(entities.iter().any(|e| e.label == EntityLabel::Person))
    }
}

impl fmt::Debug for PersonClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonClassifier")
            .field("backend", &self.recognizer.name())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Deterministic recognizer for unit tests in this crate.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    pub struct StubRecognizer {
        labels: HashMap<String, EntityLabel>,
        fail: bool,
        calls: AtomicU32,
    }

    impl StubRecognizer {
        /// Tags each listed text as a person.
        pub fn people(names: &[&str]) -> Self {
            Self {
                labels: names
                    .iter()
                    .map(|n| (n.to_string(), EntityLabel::Person))
                    .collect(),
                fail: false,
                calls: AtomicU32::new(0),
            }
        }

        pub fn with_label(mut self, text: &str, label: EntityLabel) -> Self {
            self.labels.insert(text.to_string(), label);
            self
        }

        pub fn failing() -> Self {
            Self {
                labels: HashMap::new(),
                fail: true,
                calls: AtomicU32::new(0),
            }
        }

        pub fn calls(&self) -> u32 {
            self.calls.load(Ordering::Relaxed)
        }
    }

    #[async_trait]
    impl EntityRecognizer for StubRecognizer {
        fn name(&self) -> &str {
            "stub"
        }

        async fn extract(&self, text: &str) -> Result<Vec<Entity>, RecognizerError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if self.fail {
                return Err(RecognizerError::Unavailable("stub is down".into()));
            }
            Ok(self
                .labels
                .get(text)
                .map(|label| vec![Entity::whole(text, label.clone())])
                .unwrap_or_default())
        }
    }
}
