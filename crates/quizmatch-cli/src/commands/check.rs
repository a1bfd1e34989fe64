//! The `quizmatch check` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmatch_ner::config::load_config_from;

use super::build_judge;

pub async fn execute(
    answer: String,
    expected: String,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let judge = build_judge(&config).await?;

    let verdict = judge.judge(&answer, &expected).await?;

    if json {
        println!("{}", serde_json::to_string(&verdict)?);
    } else if let Some(kind) = verdict.matched_by {
        println!("correct ({kind} match)");
    } else {
        println!("incorrect");
    }

    Ok(())
}
