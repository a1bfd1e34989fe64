//! CLI subcommands.

use anyhow::Result;

use quizmatch_core::error::RecognizerError;
use quizmatch_core::AnswerJudge;
use quizmatch_ner::config::QuizmatchConfig;
use quizmatch_ner::create_recognizer;

pub mod check;
pub mod compare;
pub mod grade;
pub mod init;
pub mod validate;

/// Build the recognizer and judge, failing fast if the classifier is not ready.
pub async fn build_judge(config: &QuizmatchConfig) -> Result<AnswerJudge> {
    let recognizer = create_recognizer(&config.recognizer)?;
    if let Err(e) = recognizer.health_check().await {
        let context = format!(
            "named-entity classifier '{}' unavailable; {}",
            recognizer.name(),
            unavailable_hint(&e)
        );
        return Err(anyhow::Error::new(e).context(context));
    }
    tracing::info!(recognizer = recognizer.name(), "classifier ready");

    Ok(AnswerJudge::new(recognizer, config.judge_config()))
}

fn unavailable_hint(err: &RecognizerError) -> &'static str {
    if err.is_permanent() {
        "check the [recognizer] settings in the config file"
    } else {
        "retry once the service is up"
    }
}
