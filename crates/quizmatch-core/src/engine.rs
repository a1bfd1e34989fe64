//! The answer judge.
//!
//! Normalizes both answers and runs the match policies in order. The judge
//! keeps no per-call state and can be shared across tasks.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::JudgeError;
use crate::normalize::{Normalizer, SplitMode};
use crate::policy::{default_policies, MatchContext, MatchKind, MatchPolicy};
use crate::similarity::DEFAULT_SIMILARITY_THRESHOLD;
use crate::traits::{EntityRecognizer, PersonClassifier};

/// Configuration for the answer judge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JudgeConfig {
    /// Minimum fuzzy similarity (inclusive) to accept a typo.
    pub similarity_threshold: f64,
    /// How normalized text is split into tokens.
    pub split_mode: SplitMode,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            split_mode: SplitMode::SingleSpace,
        }
    }
}

/// Outcome of judging one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub correct: bool,
    /// The policy that accepted the answer, if any.
    pub matched_by: Option<MatchKind>,
}

impl Verdict {
    fn accepted(kind: MatchKind) -> Self {
        Self {
            correct: true,
            matched_by: Some(kind),
        }
    }

    fn rejected() -> Self {
        Self {
            correct: false,
            matched_by: None,
        }
    }
}

/// Decides whether a submitted answer matches the correct one.
pub struct AnswerJudge {
    normalizer: Normalizer,
    classifier: PersonClassifier,
    policies: Vec<Box<dyn MatchPolicy>>,
}

impl AnswerJudge {
    /// Build a judge with the standard exact → surname → fuzzy policies.
    pub fn new(recognizer: Arc<dyn EntityRecognizer>, config: JudgeConfig) -> Self {
        Self::with_policies(
            recognizer,
            Normalizer::new(config.split_mode),
            default_policies(config.similarity_threshold),
        )
    }

    /// Build a judge with a custom normalizer and policy order.
    pub fn with_policies(
        recognizer: Arc<dyn EntityRecognizer>,
        normalizer: Normalizer,
        policies: Vec<Box<dyn MatchPolicy>>,
    ) -> Self {
        Self {
            normalizer,
            classifier: PersonClassifier::new(recognizer),
            policies,
        }
    }

    /// Returns whether `user_response` should be accepted for `correct_response`.
    pub async fn is_correct(
        &self,
        user_response: &str,
        correct_response: &str,
    ) -> Result<bool, JudgeError> {
        Ok(self.judge(user_response, correct_response).await?.correct)
    }

    /// Like [`is_correct`](Self::is_correct), also reporting which policy matched.
    pub async fn judge(
        &self,
        user_response: &str,
        correct_response: &str,
    ) -> Result<Verdict, JudgeError> {
        let user = self.normalizer.normalize(user_response);
        let correct = self.normalizer.normalize(correct_response);
        let ctx = MatchContext {
            user: &user,
            correct: &correct,
            classifier: &self.classifier,
        };

        for policy in &self.policies {
            if policy.matches(&ctx).await? {
                debug!(policy = %policy.kind(), ?user, ?correct, "answer accepted");
                return Ok(Verdict::accepted(policy.kind()));
            }
        }

        debug!(?user, ?correct, "answer rejected");
        Ok(Verdict::rejected())
    }

    /// Name of the recognizer backend behind the person classifier.
    pub fn recognizer_name(&self) -> &str {
        self.classifier.backend()
    }
}
