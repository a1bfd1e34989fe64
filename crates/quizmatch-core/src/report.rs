//! Grade report types with JSON persistence and decision diffs.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grading::GradeResult;
use crate::statistics::GradeStats;

/// A complete grading report for one answer set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the answer set.
    pub answer_set: AnswerSetSummary,
    /// Recognizer backend used for the surname policy.
    pub recognizer: String,
    /// Per-case results, in answer-set order.
    pub results: Vec<GradeResult>,
    /// Aggregate statistics.
    pub stats: GradeStats,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of an answer set (without the cases).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSetSummary {
    pub id: String,
    pub name: String,
    pub case_count: usize,
}

impl GradeReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradeReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare decisions in this report against a baseline report.
    ///
    /// Cases are matched by ID. A case decided in the baseline but errored
    /// now is a lost decision, not an unchanged one.
    pub fn diff(&self, baseline: &GradeReport) -> DecisionDiff {
        let baseline_decisions: HashMap<&str, Option<bool>> = baseline
            .results
            .iter()
            .map(|r| (r.case_id.as_str(), r.correct))
            .collect();

        let mut diff = DecisionDiff::default();

        for result in &self.results {
            let Some(&before) = baseline_decisions.get(result.case_id.as_str()) else {
                diff.new_cases += 1;
                continue;
            };
            match (before, result.correct) {
                (Some(before), Some(after)) if before != after => {
                    diff.flipped.push(FlippedDecision {
                        case_id: result.case_id.clone(),
                        answer: result.answer.clone(),
                        expected_answer: result.expected_answer.clone(),
                        before,
                        after,
                        expected: result.expected,
                    });
                }
                (Some(before), None) => {
                    diff.lost.push(LostDecision {
                        case_id: result.case_id.clone(),
                        answer: result.answer.clone(),
                        expected_answer: result.expected_answer.clone(),
                        before,
                        expected: result.expected,
                        error: result.error.clone(),
                    });
                }
                (None, Some(_)) => diff.recovered += 1,
                _ => diff.unchanged += 1,
            }
        }

        diff.removed_cases = baseline
            .results
            .iter()
            .filter(|b| !self.results.iter().any(|r| r.case_id == b.case_id))
            .count();

        diff
    }
}

/// Differences between two grading runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionDiff {
    pub flipped: Vec<FlippedDecision>,
    /// Cases decided in the baseline that could not be judged this time.
    pub lost: Vec<LostDecision>,
    /// Cases that errored in the baseline and are decided now.
    pub recovered: usize,
    pub unchanged: usize,
    pub new_cases: usize,
    pub removed_cases: usize,
}

impl DecisionDiff {
    /// Flips that moved a labelled case away from its label.
    pub fn regressions(&self) -> impl Iterator<Item = &FlippedDecision> {
        self.flipped
            .iter()
            .filter(|f| f.expected.is_some_and(|label| label != f.after))
    }

    /// Lost decisions on labelled cases.
    pub fn lost_labelled(&self) -> impl Iterator<Item = &LostDecision> {
        self.lost.iter().filter(|l| l.expected.is_some())
    }

    /// Regressing flips plus labelled cases that lost their decision.
    pub fn regression_count(&self) -> usize {
        self.regressions().count() + self.lost_labelled().count()
    }
}

/// A case whose decision changed between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlippedDecision {
    pub case_id: String,
    pub answer: String,
    pub expected_answer: String,
    pub before: bool,
    pub after: bool,
    pub expected: Option<bool>,
}

/// A case that was decided in the baseline and errored in the current run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LostDecision {
    pub case_id: String,
    pub answer: String,
    pub expected_answer: String,
    pub before: bool,
    pub expected: Option<bool>,
    pub error: Option<String>,
}
