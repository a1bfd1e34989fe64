//! HTTP named-entity recognition service backend.
//!
//! Talks to a small JSON service wrapping a pretrained NER model (for
//! example a spaCy pipeline):
//!
//! - `POST {base_url}/entities` with `{"text": ..., "model": ...}` returns
//!   `{"entities": [{"text", "label", "start", "end"}]}`
//! - `GET {base_url}/health` answers 2xx once the model is loaded

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use quizmatch_core::error::RecognizerError;
use quizmatch_core::traits::{Entity, EntityLabel, EntityRecognizer};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_MODEL: &str = "en_core_web_sm";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Recognizer backed by a remote NER service.
pub struct HttpRecognizer {
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpRecognizer {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, RecognizerError> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| RecognizerError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            timeout_secs,
            client,
        })
    }

    fn map_send_error(&self, e: reqwest::Error) -> RecognizerError {
        if e.is_timeout() {
            RecognizerError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            RecognizerError::Unavailable(format!(
                "NER service not reachable at {}. Is it running?",
                self.base_url
            ))
        } else {
            RecognizerError::Unavailable(e.to_string())
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[derive(Serialize)]
struct EntitiesRequest<'a> {
    text: &'a str,
    model: &'a str,
}

#[derive(Deserialize)]
struct EntitiesResponse {
    #[serde(default)]
    entities: Vec<ServiceEntity>,
}

#[derive(Deserialize)]
struct ServiceEntity {
    text: String,
    label: String,
    #[serde(default)]
    start: usize,
    #[serde(default)]
    end: usize,
}

#[async_trait]
impl EntityRecognizer for HttpRecognizer {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, text), fields(model = %self.model))]
    async fn extract(&self, text: &str) -> Result<Vec<Entity>, RecognizerError> {
        let body = EntitiesRequest {
            text,
            model: &self.model,
        };

        let url = format!("{}/entities", self.base_url);
        let response = self
            .authorize(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(RecognizerError::AuthenticationFailed(body));
        }
        if status == 404 {
            let message = response.text().await.unwrap_or_default();
            // A 404 naming our model means the route exists but the model does not.
            if message.contains(&self.model) {
                return Err(RecognizerError::ModelNotFound(format!(
                    "model '{}' is not loaded by the NER service at {}",
                    self.model, self.base_url
                )));
            }
            return Err(RecognizerError::ApiError {
                status,
                message: format!("no entities endpoint at {url}"),
            });
        }
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(RecognizerError::ApiError { status, message });
        }

        let parsed: EntitiesResponse = response
            .json()
            .await
            .map_err(|e| RecognizerError::InvalidResponse(format!("failed to parse entities: {e}")))?;

        let entities: Vec<Entity> = parsed
            .entities
            .into_iter()
            .map(|e| Entity {
                label: EntityLabel::from_tag(&e.label),
                text: e.text,
                start: e.start,
                end: e.end,
            })
            .collect();

        tracing::debug!(count = entities.len(), "entities extracted");
        Ok(entities)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn health_check(&self) -> Result<(), RecognizerError> {
        let response = self
            .authorize(self.client.get(format!("{}/health", self.base_url)))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status.as_u16() == 401 || status.as_u16() == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(RecognizerError::AuthenticationFailed(body));
        }
        let body = response.text().await.unwrap_or_default();
        Err(RecognizerError::Unavailable(format!(
            "NER service at {} is not ready (HTTP {}): {}",
            self.base_url,
            status.as_u16(),
            body
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn recognizer(server: &MockServer) -> HttpRecognizer {
        HttpRecognizer::new(&server.uri(), DEFAULT_MODEL, None, 5).unwrap()
    }

    #[tokio::test]
    async fn extracts_person_entities() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "entities": [
                {"text": "albert einstein", "label": "PERSON", "start": 0, "end": 15}
            ]
        });

        Mock::given(method("POST"))
            .and(path("/entities"))
            .and(body_json(serde_json::json!({
                "text": "albert einstein",
                "model": "en_core_web_sm"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let entities = recognizer(&server).extract("albert einstein").await.unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].label, EntityLabel::Person);
        assert_eq!(entities[0].end, 15);
    }

    #[tokio::test]
    async fn empty_entity_list() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/entities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"entities": []})))
            .mount(&server)
            .await;

        let entities = recognizer(&server).extract("mona lisa").await.unwrap();
        assert!(entities.is_empty());
    }

    #[tokio::test]
    async fn sends_bearer_key() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/entities"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"entities": []})))
            .mount(&server)
            .await;

        let recognizer =
            HttpRecognizer::new(&server.uri(), DEFAULT_MODEL, Some("secret".into()), 5).unwrap();
        assert!(recognizer.extract("paris").await.is_ok());
    }

    #[tokio::test]
    async fn unauthorized() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/entities"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = recognizer(&server).extract("paris").await.unwrap_err();
        assert!(matches!(err, RecognizerError::AuthenticationFailed(_)));
        assert!(err.is_permanent());
    }

    #[tokio::test]
    async fn model_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/entities"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string("model en_core_web_sm is not installed"),
            )
            .mount(&server)
            .await;

        let err = recognizer(&server).extract("paris").await.unwrap_err();
        assert!(matches!(err, RecognizerError::ModelNotFound(_)));
        assert!(err.to_string().contains("en_core_web_sm"));
    }

    #[tokio::test]
    async fn missing_route_names_the_url() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let recognizer =
            HttpRecognizer::new(&format!("{}/v2", server.uri()), DEFAULT_MODEL, None, 5).unwrap();
        let err = recognizer.extract("paris").await.unwrap_err();
        assert!(matches!(err, RecognizerError::ApiError { status: 404, .. }));
        assert!(!err.is_permanent());
        assert!(err.to_string().contains("/v2/entities"));
    }

    #[tokio::test]
    async fn server_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/entities"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
            .mount(&server)
            .await;

        let err = recognizer(&server).extract("paris").await.unwrap_err();
        assert!(matches!(err, RecognizerError::ApiError { status: 500, .. }));
    }

    #[tokio::test]
    async fn malformed_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/entities"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = recognizer(&server).extract("paris").await.unwrap_err();
        assert!(matches!(err, RecognizerError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn health_check_reports_readiness() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        assert!(recognizer(&server).health_check().await.is_ok());
    }

    #[tokio::test]
    async fn health_check_fails_while_loading() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503).set_body_string("loading model"))
            .mount(&server)
            .await;

        let err = recognizer(&server).health_check().await.unwrap_err();
        assert!(matches!(err, RecognizerError::Unavailable(_)));
        assert!(err.to_string().contains("loading model"));
    }

    #[tokio::test]
    async fn health_check_rejects_bad_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = recognizer(&server).health_check().await.unwrap_err();
        assert!(matches!(err, RecognizerError::AuthenticationFailed(_)));
        assert!(err.is_permanent());
    }

    #[tokio::test]
    async fn unreachable_service() {
        // Port 9 (discard) is almost never listening.
        let recognizer = HttpRecognizer::new("http://127.0.0.1:9", DEFAULT_MODEL, None, 2).unwrap();
        let err = recognizer.health_check().await.unwrap_err();
        assert!(matches!(
            err,
            RecognizerError::Unavailable(_) | RecognizerError::Timeout(_)
        ));
    }
}
