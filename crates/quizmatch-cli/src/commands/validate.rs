//! The `quizmatch validate` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;

use quizmatch_core::model::AnswerSet;
use quizmatch_core::parser::{load_answer_sets, validate_answer_set};

pub fn execute(answer_set_path: PathBuf) -> Result<()> {
    let sets = load_answer_sets(&answer_set_path)?;

    let mut total_warnings = 0;

    for set in &sets {
        let labelled = set.cases.iter().filter(|c| c.expected.is_some()).count();
        println!(
            "Answer set: {} ({} cases, {labelled} labelled)",
            set.name,
            set.cases.len()
        );
        if let Some(tags) = tag_summary(set) {
            println!("  tags: {tags}");
        }

        let warnings = validate_answer_set(set);
        for w in &warnings {
            match &w.case_id {
                Some(id) => println!("  [{id}] WARNING: {}", w.message),
                None => println!("  WARNING: {}", w.message),
            }
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All answer sets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

/// Tag counts like `art (2), geography (1)`, sorted by tag.
fn tag_summary(set: &AnswerSet) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for tag in set.cases.iter().flat_map(|c| &c.tags) {
        *counts.entry(tag.as_str()).or_default() += 1;
    }
    if counts.is_empty() {
        return None;
    }
    Some(
        counts
            .iter()
            .map(|(tag, n)| format!("{tag} ({n})"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizmatch_core::model::AnswerCase;

    fn set(tags: &[&[&str]]) -> AnswerSet {
        AnswerSet {
            id: "s".into(),
            name: "S".into(),
            description: String::new(),
            cases: tags
                .iter()
                .enumerate()
                .map(|(i, t)| AnswerCase {
                    id: format!("c{i}"),
                    question: String::new(),
                    answer: "a".into(),
                    expected_answer: "b".into(),
                    expected: None,
                    tags: t.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn tag_summary_counts_sorted() {
        let summary = tag_summary(&set(&[&["people", "art"], &["art"], &[]]));
        assert_eq!(summary.as_deref(), Some("art (2), people (1)"));
        assert_eq!(tag_summary(&set(&[&[]])), None);
    }
}
