//! Match policies tried by the judge, in order.
//!
//! Each policy is a pure predicate over the two normalized token sequences
//! and the person classifier. The judge accepts an answer as soon as one
//! policy matches.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RecognizerError;
use crate::normalize::Normalizer;
use crate::similarity::is_similar;
use crate::traits::PersonClassifier;

/// Longest correct answer, in tokens, that the surname shortcut applies to.
///
/// Compound surnames and middle names ("Albert James Einstein") are not
/// handled.
pub const MAX_NAME_TOKENS: usize = 2;

/// Inputs shared by every policy for one judge call.
#[derive(Debug)]
pub struct MatchContext<'a> {
    /// Normalized tokens of the submitted answer.
    pub user: &'a [String],
    /// Normalized tokens of the correct answer.
    pub correct: &'a [String],
    pub classifier: &'a PersonClassifier,
}

/// Identifies which policy accepted an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Surname,
    Fuzzy,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::Exact => write!(f, "exact"),
            MatchKind::Surname => write!(f, "surname"),
            MatchKind::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// A single answer-equivalence rule.
#[async_trait]
pub trait MatchPolicy: Send + Sync {
    fn kind(&self) -> MatchKind;

    /// Returns `true` if this policy accepts the answer.
    async fn matches(&self, ctx: &MatchContext<'_>) -> Result<bool, RecognizerError>;
}

/// Token sequences are identical.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

#[async_trait]
impl MatchPolicy for ExactMatch {
    fn kind(&self) -> MatchKind {
        MatchKind::Exact
    }

    async fn matches(&self, ctx: &MatchContext<'_>) -> Result<bool, RecognizerError> {
        Ok(ctx.user == ctx.correct)
    }
}

/// A single-token answer matching the last name of a short person name.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurnameShortcut;

impl SurnameShortcut {
    fn applies(ctx: &MatchContext<'_>) -> bool {
        ctx.user.len() == 1 && ctx.correct.len() <= MAX_NAME_TOKENS
    }
}

#[async_trait]
impl MatchPolicy for SurnameShortcut {
    fn kind(&self) -> MatchKind {
        MatchKind::Surname
    }

    async fn matches(&self, ctx: &MatchContext<'_>) -> Result<bool, RecognizerError> {
        if !Self::applies(ctx) {
            return Ok(false);
        }
        let Some(surname) = ctx.correct.last() else {
            return Ok(false);
        };

        let full_name = Normalizer::join(ctx.correct);
        if !ctx.classifier.is_person(&full_name).await? {
            return Ok(false);
        }
        Ok(ctx.user[0] == *surname)
    }
}

/// Joined answers are similar enough to count as a typo.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatch {
    pub threshold: f64,
}

#[async_trait]
impl MatchPolicy for FuzzyMatch {
    fn kind(&self) -> MatchKind {
        MatchKind::Fuzzy
    }

    async fn matches(&self, ctx: &MatchContext<'_>) -> Result<bool, RecognizerError> {
        let user = Normalizer::join(ctx.user);
        let correct = Normalizer::join(ctx.correct);
        Ok(is_similar(&user, &correct, self.threshold))
    }
}

/// The standard policy order: exact, surname, fuzzy.
pub fn default_policies(threshold: f64) -> Vec<Box<dyn MatchPolicy>> {
    vec![
        Box::new(ExactMatch),
        Box::new(SurnameShortcut),
        Box::new(FuzzyMatch { threshold }),
    ]
}
