//! Aggregate statistics over graded answers.
//!
//! When cases carry a human label, the judge is scored against it:
//! accuracy over labelled, decided cases, plus false accepts (judge said
//! correct, label says wrong) and false rejects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::grading::GradeResult;
use crate::policy::MatchKind;

/// Summary statistics for one graded answer set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradeStats {
    pub total: usize,
    /// Cases the judge accepted.
    pub accepted: usize,
    /// Cases the judge rejected.
    pub rejected: usize,
    /// Cases the judge could not decide.
    pub errored: usize,
    /// Decided cases that carry a human label.
    pub labelled: usize,
    /// Labelled cases where the judge agreed with the label.
    pub agreements: usize,
    /// `agreements / labelled`, or `None` when nothing is labelled.
    pub accuracy: Option<f64>,
    pub false_accepts: usize,
    pub false_rejects: usize,
    /// Accepted answers per policy.
    pub per_policy: BTreeMap<MatchKind, usize>,
}

/// Compute statistics for a batch of grade results.
pub fn compute_grade_stats(results: &[GradeResult]) -> GradeStats {
    let mut stats = GradeStats {
        total: results.len(),
        ..Default::default()
    };

    for result in results {
        match result.correct {
            Some(true) => stats.accepted += 1,
            Some(false) => stats.rejected += 1,
            None => stats.errored += 1,
        }

        if let Some(kind) = result.matched_by {
            *stats.per_policy.entry(kind).or_insert(0) += 1;
        }

        if let (Some(decided), Some(label)) = (result.correct, result.expected) {
            stats.labelled += 1;
            if decided == label {
                stats.agreements += 1;
            } else if decided {
                stats.false_accepts += 1;
            } else {
                stats.false_rejects += 1;
            }
        }
    }

    if stats.labelled > 0 {
        stats.accuracy = Some(stats.agreements as f64 / stats.labelled as f64);
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(
        correct: Option<bool>,
        expected: Option<bool>,
        matched_by: Option<MatchKind>,
    ) -> GradeResult {
        GradeResult {
            case_id: "c".into(),
            answer: String::new(),
            expected_answer: String::new(),
            correct,
            matched_by,
            expected,
            error: None,
            duration_ms: 0,
        }
    }

    #[test]
    fn empty_results() {
        let stats = compute_grade_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.accuracy, None);
    }

    #[test]
    fn counts_agreement_and_errors() {
        let results = vec![
            result(Some(true), Some(true), Some(MatchKind::Exact)),
            result(Some(true), Some(false), Some(MatchKind::Fuzzy)),
            result(Some(false), Some(true), None),
            result(Some(false), Some(false), None),
            result(Some(true), None, Some(MatchKind::Exact)),
            result(None, Some(true), None),
        ];
        let stats = compute_grade_stats(&results);

        assert_eq!(stats.total, 6);
        assert_eq!(stats.accepted, 3);
        assert_eq!(stats.rejected, 2);
        assert_eq!(stats.errored, 1);
        assert_eq!(stats.labelled, 4);
        assert_eq!(stats.agreements, 2);
        assert_eq!(stats.false_accepts, 1);
        assert_eq!(stats.false_rejects, 1);
        assert_eq!(stats.accuracy, Some(0.5));
        assert_eq!(stats.per_policy.get(&MatchKind::Exact), Some(&2));
        assert_eq!(stats.per_policy.get(&MatchKind::Surname), None);
    }

    #[test]
    fn per_policy_serializes_as_names() {
        let stats = compute_grade_stats(&[result(Some(true), None, Some(MatchKind::Surname))]);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains(r#""surname":1"#));
    }
}
