//! The `quizmatch init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizmatch.toml").exists() {
        println!("quizmatch.toml already exists, skipping.");
    } else {
        std::fs::write("quizmatch.toml", SAMPLE_CONFIG)?;
        println!("Created quizmatch.toml");
    }

    std::fs::create_dir_all("answer-sets")?;
    let example_path = std::path::Path::new("answer-sets/example.toml");
    if example_path.exists() {
        println!("answer-sets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_ANSWER_SET)?;
        println!("Created answer-sets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point [recognizer] in quizmatch.toml at your NER service, or use the gazetteer");
    println!("  2. Run: quizmatch validate --answer-set answer-sets/example.toml");
    println!("  3. Run: quizmatch grade --answer-set answer-sets/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizmatch configuration

similarity_threshold = 0.85
split_mode = "single_space"
parallelism = 4
output_dir = "./quizmatch-results"

# Offline given-name list; swap for the HTTP backend below when a model is available.
[recognizer]
type = "gazetteer"
given_names = ["albert", "marie", "leonardo", "isaac", "ada"]

# [recognizer]
# type = "http"
# base_url = "http://localhost:8080"
# model = "en_core_web_sm"
# api_key = "${QUIZMATCH_NER_KEY}"
"#;

const EXAMPLE_ANSWER_SET: &str = r#"[answer_set]
id = "example"
name = "Example Answer Set"
description = "A few answers to get started"

[[cases]]
id = "mona-lisa"
question = "Which painting hangs behind bulletproof glass in the Louvre?"
answer = "The Mona Lisa"
expected_answer = "Mona Lisa"
expected = true
tags = ["art"]

[[cases]]
id = "einstein-surname"
question = "Who developed the theory of general relativity?"
answer = "Einstein"
expected_answer = "Albert Einstein"
expected = true
tags = ["science", "people"]

[[cases]]
id = "paris-typo"
question = "What is the capital of France?"
answer = "Pari"
expected_answer = "Paris"
expected = true
tags = ["geography"]

[[cases]]
id = "wrong-capital"
question = "What is the capital of Italy?"
answer = "Milan"
expected_answer = "Rome"
expected = false
tags = ["geography"]
"#;
