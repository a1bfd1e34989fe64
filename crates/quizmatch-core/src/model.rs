//! Answer sets for batch grading.
//!
//! An answer set is a list of submitted answers, each paired with the
//! correct answer and optionally a human label saying whether it should be
//! accepted.

use serde::{Deserialize, Serialize};

/// One submitted answer to grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerCase {
    /// Unique identifier within the set.
    pub id: String,
    /// The trivia question, for display only.
    #[serde(default)]
    pub question: String,
    /// The submitted answer.
    pub answer: String,
    /// The known correct answer.
    pub expected_answer: String,
    /// Human judgement, used to measure the judge.
    #[serde(default)]
    pub expected: Option<bool>,
    /// Tags for filtering cases.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A collection of answer cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cases: Vec<AnswerCase>,
}

impl AnswerSet {
    /// Keep only cases carrying at least one of `tags`.
    pub fn retain_tags(&mut self, tags: &[&str]) {
        self.cases
            .retain(|c| c.tags.iter().any(|t| tags.contains(&t.as_str())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(id: &str, tags: &[&str]) -> AnswerCase {
        AnswerCase {
            id: id.into(),
            question: String::new(),
            answer: "a".into(),
            expected_answer: "b".into(),
            expected: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn retain_tags_filters_cases() {
        let mut set = AnswerSet {
            id: "s".into(),
            name: "S".into(),
            description: String::new(),
            cases: vec![case("1", &["art"]), case("2", &["science"]), case("3", &[])],
        };
        set.retain_tags(&["art", "history"]);
        assert_eq!(set.cases.len(), 1);
        assert_eq!(set.cases[0].id, "1");
    }

    #[test]
    fn answer_case_defaults() {
        let case: AnswerCase =
            serde_json::from_str(r#"{"id":"x","answer":"Paris","expected_answer":"paris"}"#)
                .unwrap();
        assert!(case.question.is_empty());
        assert_eq!(case.expected, None);
        assert!(case.tags.is_empty());
    }
}
