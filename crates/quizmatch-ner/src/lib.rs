//! quizmatch-ner: Named-entity recognizer backends.
//!
//! Implements the `EntityRecognizer` trait for an HTTP NER service and an
//! offline given-name gazetteer, plus the configuration file that selects
//! between them.

pub mod config;
pub mod gazetteer;
pub mod http;

pub use config::{create_recognizer, load_config_from, QuizmatchConfig, RecognizerConfig};
