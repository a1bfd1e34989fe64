//! quizmatch-core: Answer-equivalence engine, match policies, and grading.
//!
//! This crate decides whether a free-text trivia answer matches a known
//! correct answer. It normalizes both strings, tries an exact token match,
//! lets a bare surname stand in for a one- or two-token person name, and
//! finally falls back to fuzzy string similarity.

pub mod engine;
pub mod error;
pub mod grading;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod policy;
pub mod report;
pub mod similarity;
pub mod statistics;
pub mod traits;

pub use engine::{AnswerJudge, JudgeConfig, Verdict};
pub use error::{JudgeError, RecognizerError};
pub use normalize::{normalize, Normalizer, SplitMode};
pub use similarity::{similarity, DEFAULT_SIMILARITY_THRESHOLD};
pub use traits::{Entity, EntityLabel, EntityRecognizer, PersonClassifier};
