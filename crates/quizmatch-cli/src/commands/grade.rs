//! The `quizmatch grade` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use quizmatch_core::grading::{grade_set, GradeResult, ProgressReporter};
use quizmatch_core::parser::load_answer_sets;
use quizmatch_core::report::GradeReport;
use quizmatch_ner::config::load_config_from;

use super::build_judge;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_case_complete(&self, result: &GradeResult) {
        let decision = match (result.correct, result.matched_by) {
            (Some(true), Some(kind)) => format!("OK ({kind})"),
            (Some(true), None) => "OK".to_string(),
            (Some(false), _) => "WRONG".to_string(),
            (None, _) => "ERROR".to_string(),
        };
        let label = match result.agrees() {
            Some(false) => " [disagrees with label]",
            _ => "",
        };
        eprintln!(
            "  {}: {:?} vs {:?} -> {decision}{label}",
            result.case_id, result.answer, result.expected_answer
        );
    }

    fn on_set_complete(&self, total: usize, errored: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {} graded, {errored} errored ({:.1}s)",
            total - errored,
            elapsed.as_secs_f64()
        );
    }
}

pub async fn execute(
    answer_set_path: PathBuf,
    parallelism: Option<usize>,
    output: Option<PathBuf>,
    filter: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let parallelism = parallelism.unwrap_or(config.parallelism);
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");
    let output = output.unwrap_or_else(|| config.output_dir.clone());

    let mut answer_sets = load_answer_sets(&answer_set_path)?;

    if let Some(filter_tags) = &filter {
        let tags: Vec<&str> = filter_tags.split(',').map(|s| s.trim()).collect();
        for set in &mut answer_sets {
            set.retain_tags(&tags);
        }
    }

    let judge = build_judge(&config).await?;
    let reporter = ConsoleReporter;
    let mut reports = Vec::with_capacity(answer_sets.len());

    for answer_set in &answer_sets {
        eprintln!(
            "quizmatch v{}: Grading {} answers in '{}'",
            env!("CARGO_PKG_VERSION"),
            answer_set.cases.len(),
            answer_set.name
        );
        eprintln!();

        let report = grade_set(&judge, answer_set, parallelism, &reporter).await?;

        std::fs::create_dir_all(&output)?;
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let path = output.join(format!("grade-{}-{timestamp}.json", answer_set.id));
        report.save_json(&path)?;
        eprintln!("Results saved to: {}", path.display());

        reports.push(report);
    }

    print_summary(&reports);

    let errored: usize = reports.iter().map(|r| r.stats.errored).sum();
    anyhow::ensure!(
        errored == 0,
        "{errored} case(s) could not be judged: named-entity classifier unavailable"
    );

    Ok(())
}

fn print_summary(reports: &[GradeReport]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Answer set",
        "Cases",
        "Accepted",
        "Rejected",
        "Errored",
        "Accuracy",
        "False accepts",
        "False rejects",
    ]);

    for report in reports {
        let stats = &report.stats;
        let accuracy = stats
            .accuracy
            .map(|a| format!("{:.1}%", a * 100.0))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&report.answer_set.name),
            Cell::new(stats.total),
            Cell::new(stats.accepted),
            Cell::new(stats.rejected),
            Cell::new(stats.errored),
            Cell::new(accuracy),
            Cell::new(stats.false_accepts),
            Cell::new(stats.false_rejects),
        ]);
    }

    println!("{table}");
}
