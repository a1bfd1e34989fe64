//! Batch grading of answer sets.
//!
//! Runs the judge over every case of an answer set with bounded
//! concurrency. A case whose classifier call fails is recorded as errored;
//! it is never counted as an incorrect answer.

use std::time::{Duration, Instant};

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::engine::AnswerJudge;
use crate::model::{AnswerCase, AnswerSet};
use crate::policy::MatchKind;
use crate::report::{AnswerSetSummary, GradeReport};
use crate::statistics::compute_grade_stats;

/// Grading result for one case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeResult {
    pub case_id: String,
    pub answer: String,
    pub expected_answer: String,
    /// The judge's decision, `None` if the judge failed.
    pub correct: Option<bool>,
    pub matched_by: Option<MatchKind>,
    /// Human label copied from the case.
    pub expected: Option<bool>,
    /// Error message when the judge could not decide.
    #[serde(default)]
    pub error: Option<String>,
    pub duration_ms: u64,
}

impl GradeResult {
    /// Whether the judge agreed with the human label, if both exist.
    pub fn agrees(&self) -> Option<bool> {
        Some(self.correct? == self.expected?)
    }
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_case_complete(&self, result: &GradeResult);
    fn on_set_complete(&self, total: usize, errored: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_case_complete(&self, _: &GradeResult) {}
    fn on_set_complete(&self, _: usize, _: usize, _: Duration) {}
}

/// Grade every case in `set`, at most `parallelism` at a time.
pub async fn grade_set(
    judge: &AnswerJudge,
    set: &AnswerSet,
    parallelism: usize,
    progress: &dyn ProgressReporter,
) -> Result<GradeReport> {
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");

    let start = Instant::now();
    let semaphore = Semaphore::new(parallelism);
    let mut futures = FuturesUnordered::new();

    for (index, case) in set.cases.iter().enumerate() {
        let semaphore = &semaphore;
        futures.push(async move {
            let _permit = semaphore
                .acquire()
                .await
                .map_err(|_| anyhow::anyhow!("semaphore closed"))?;
            anyhow::Ok((index, grade_case(judge, case).await))
        });
    }

    let mut graded = Vec::with_capacity(set.cases.len());
    while let Some(next) = futures.next().await {
        let (index, result) = next?;
        if let Some(err) = &result.error {
            tracing::error!("grading failed for {}: {err}", result.case_id);
        }
        progress.on_case_complete(&result);
        graded.push((index, result));
    }
    graded.sort_by_key(|(index, _)| *index);
    let results: Vec<GradeResult> = graded.into_iter().map(|(_, r)| r).collect();

    let elapsed = start.elapsed();
    let stats = compute_grade_stats(&results);
    progress.on_set_complete(results.len(), stats.errored, elapsed);

    Ok(GradeReport {
        id: Uuid::new_v4(),
        created_at: chrono::Utc::now(),
        answer_set: AnswerSetSummary {
            id: set.id.clone(),
            name: set.name.clone(),
            case_count: set.cases.len(),
        },
        recognizer: judge.recognizer_name().to_string(),
        results,
        stats,
        duration_ms: elapsed.as_millis() as u64,
    })
}

async fn grade_case(judge: &AnswerJudge, case: &AnswerCase) -> GradeResult {
    let case_start = Instant::now();
    let outcome = judge.judge(&case.answer, &case.expected_answer).await;
    let duration_ms = case_start.elapsed().as_millis() as u64;

    let (correct, matched_by, error) = match outcome {
        Ok(verdict) => (Some(verdict.correct), verdict.matched_by, None),
        Err(e) => (None, None, Some(format!("{:#}", anyhow::Error::new(e)))),
    };

    GradeResult {
        case_id: case.id.clone(),
        answer: case.answer.clone(),
        expected_answer: case.expected_answer.clone(),
        correct,
        matched_by,
        expected: case.expected,
        error,
        duration_ms,
    }
}
