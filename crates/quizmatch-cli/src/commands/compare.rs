//! The `quizmatch compare` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmatch_core::report::GradeReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    let baseline = GradeReport::load_json(&baseline_path)?;
    let current = GradeReport::load_json(&current_path)?;

    let diff = current.diff(&baseline);
    let regressions = diff.regression_count();

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&diff)?);
        }
        _ => {
            let verdict = |accepted: bool| if accepted { "correct" } else { "incorrect" };
            println!(
                "Comparison: {} flipped decision(s), {} lost decision(s), {} regression(s), {} unchanged",
                diff.flipped.len(),
                diff.lost.len(),
                regressions,
                diff.unchanged
            );

            if !diff.flipped.is_empty() {
                println!("\nFlipped:");
                for f in &diff.flipped {
                    let marker = match f.expected {
                        Some(label) if label != f.after => " (regression)",
                        Some(_) => " (fixed)",
                        None => "",
                    };
                    println!(
                        "  {}: {:?} vs {:?} {} -> {}{marker}",
                        f.case_id,
                        f.answer,
                        f.expected_answer,
                        verdict(f.before),
                        verdict(f.after)
                    );
                }
            }

            if !diff.lost.is_empty() {
                println!("\nCould not be judged:");
                for l in &diff.lost {
                    let marker = if l.expected.is_some() { " (regression)" } else { "" };
                    println!(
                        "  {}: {:?} vs {:?} {} -> error{marker}: {}",
                        l.case_id,
                        l.answer,
                        l.expected_answer,
                        verdict(l.before),
                        l.error.as_deref().unwrap_or("unknown error")
                    );
                }
            }

            if diff.recovered > 0 {
                println!("\n{} previously errored case(s) now decided", diff.recovered);
            }
            if diff.new_cases > 0 {
                println!("\n{} new case(s)", diff.new_cases);
            }
            if diff.removed_cases > 0 {
                println!("{} removed case(s)", diff.removed_cases);
            }
        }
    }

    if fail_on_regression && regressions > 0 {
        anyhow::bail!("{regressions} regression(s) found");
    }

    Ok(())
}
