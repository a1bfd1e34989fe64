//! Configuration file loading and recognizer factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizmatch_core::engine::JudgeConfig;
use quizmatch_core::normalize::SplitMode;
use quizmatch_core::similarity::DEFAULT_SIMILARITY_THRESHOLD;
use quizmatch_core::traits::EntityRecognizer;

use crate::gazetteer::{read_names_file, GazetteerRecognizer};
use crate::http::{self, HttpRecognizer};

/// Which named-entity recognizer backs the surname policy.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecognizerConfig {
    Http {
        #[serde(default = "default_base_url")]
        base_url: String,
        #[serde(default = "default_model")]
        model: String,
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    Gazetteer {
        /// Inline given names.
        #[serde(default)]
        given_names: Vec<String>,
        /// Newline-delimited given-name file.
        #[serde(default)]
        names_file: Option<PathBuf>,
    },
}

impl std::fmt::Debug for RecognizerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecognizerConfig::Http {
                base_url,
                model,
                api_key,
                timeout_secs,
            } => f
                .debug_struct("Http")
                .field("base_url", base_url)
                .field("model", model)
                .field("api_key", &api_key.as_ref().map(|_| "***"))
                .field("timeout_secs", timeout_secs)
                .finish(),
            RecognizerConfig::Gazetteer {
                given_names,
                names_file,
            } => f
                .debug_struct("Gazetteer")
                .field("given_names", &given_names.len())
                .field("names_file", names_file)
                .finish(),
        }
    }
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        RecognizerConfig::Http {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    http::DEFAULT_BASE_URL.to_string()
}
fn default_model() -> String {
    http::DEFAULT_MODEL.to_string()
}
fn default_timeout_secs() -> u64 {
    http::DEFAULT_TIMEOUT_SECS
}

/// Top-level quizmatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizmatchConfig {
    /// Recognizer backend.
    #[serde(default)]
    pub recognizer: RecognizerConfig,
    /// Minimum fuzzy similarity (inclusive).
    #[serde(default = "default_threshold")]
    pub similarity_threshold: f64,
    /// Tokenizer used by normalization.
    #[serde(default)]
    pub split_mode: SplitMode,
    /// Max concurrently graded cases.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Output directory for grade reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}
fn default_parallelism() -> usize {
    4
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizmatch-results")
}

impl Default for QuizmatchConfig {
    fn default() -> Self {
        Self {
            recognizer: RecognizerConfig::default(),
            similarity_threshold: default_threshold(),
            split_mode: SplitMode::default(),
            parallelism: default_parallelism(),
            output_dir: default_output_dir(),
        }
    }
}

impl QuizmatchConfig {
    /// Judge settings from this configuration.
    pub fn judge_config(&self) -> JudgeConfig {
        JudgeConfig {
            similarity_threshold: self.similarity_threshold,
            split_mode: self.split_mode,
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.similarity_threshold),
            "similarity_threshold must be between 0.0 and 1.0, got {}",
            self.similarity_threshold
        );
        anyhow::ensure!(self.parallelism >= 1, "parallelism must be at least 1");
        Ok(())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Resolve env vars in a recognizer config.
fn resolve_recognizer_config(config: &RecognizerConfig) -> RecognizerConfig {
    match config {
        RecognizerConfig::Http {
            base_url,
            model,
            api_key,
            timeout_secs,
        } => RecognizerConfig::Http {
            base_url: resolve_env_vars(base_url),
            model: resolve_env_vars(model),
            api_key: api_key.as_ref().map(|k| resolve_env_vars(k)),
            timeout_secs: *timeout_secs,
        },
        RecognizerConfig::Gazetteer {
            given_names,
            names_file,
        } => RecognizerConfig::Gazetteer {
            given_names: given_names.clone(),
            names_file: names_file
                .as_ref()
                .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy()))),
        },
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `quizmatch.toml` in the current directory
/// 2. `~/.config/quizmatch/config.toml`
///
/// `QUIZMATCH_NER_URL` switches the recognizer to the HTTP backend at that
/// URL. `QUIZMATCH_NER_KEY` sets the HTTP backend's API key.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizmatchConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizmatch.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizmatchConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizmatchConfig::default(),
    };

    apply_env_overrides(&mut config);
    config.recognizer = resolve_recognizer_config(&config.recognizer);
    config.validate()?;

    Ok(config)
}

fn apply_env_overrides(config: &mut QuizmatchConfig) {
    if let Ok(url) = std::env::var("QUIZMATCH_NER_URL") {
        if !matches!(config.recognizer, RecognizerConfig::Http { .. }) {
            config.recognizer = RecognizerConfig::default();
        }
        if let RecognizerConfig::Http { base_url, .. } = &mut config.recognizer {
            *base_url = url;
        }
    }

    if let Ok(key) = std::env::var("QUIZMATCH_NER_KEY") {
        if let RecognizerConfig::Http { api_key, .. } = &mut config.recognizer {
            *api_key = Some(key);
        }
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizmatch"))
}

/// Create a recognizer instance from its configuration.
pub fn create_recognizer(config: &RecognizerConfig) -> Result<Arc<dyn EntityRecognizer>> {
    match config {
        RecognizerConfig::Http {
            base_url,
            model,
            api_key,
            timeout_secs,
        } => Ok(Arc::new(HttpRecognizer::new(
            base_url,
            model,
            api_key.clone(),
            *timeout_secs,
        )?)),
        RecognizerConfig::Gazetteer {
            given_names,
            names_file,
        } => {
            let mut names: Vec<String> = given_names.clone();
            if let Some(path) = names_file {
                names.extend(read_names_file(path)?);
            }
            let gazetteer = if names.is_empty() {
                GazetteerRecognizer::default()
            } else {
                GazetteerRecognizer::new(names)
            };
            tracing::debug!(names = gazetteer.len(), "gazetteer recognizer loaded");
            Ok(Arc::new(gazetteer))
        }
    }
}
