//! Portfolio assistant backed by the generative-language API.
//!
//! ### Specification
//!
//! - **Endpoint**: `{base_url}/models/{model}:generateContent`
//! - **Authentication**: API key in the `key` query parameter.
//! - **Body**: the question as the only content, the persona as system
//!   instruction.
//! - **Reply**: first candidate's first text part, unmodified. A response
//!   without one yields [`FALLBACK_REPLY`].

pub mod error;
pub mod persona;
pub mod request;
pub mod response;

pub use error::AssistantError;
pub use persona::{FALLBACK_REPLY, GREETING, PERSONA};
pub use request::GenerateRequest;
pub use response::{ApiErrorBody, GenerateResponse};

use std::time::{Duration, Instant};

use reqwest::header;

use folio_core::AppConfig;

/// Default base URL of the generative-language API.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model.
const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "folio/0.1";

/// Assistant client configuration.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub api_key: String,
    /// Base URL (default: https://generativelanguage.googleapis.com/v1beta).
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AssistantConfig {
    /// Build from the application config. Fails when no key is configured.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, AssistantError> {
        let api_key = config
            .require_assistant_api_key()
            .map_err(|_| AssistantError::MissingApiKey)?;

        Ok(Self {
            api_key: api_key.to_string(),
            model: config.assistant_model.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
            ..Default::default()
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url.trim_end_matches('/'), self.model)
    }
}

/// Generative-language API client.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    http: reqwest::Client,
    config: AssistantConfig,
}

impl AssistantClient {
    /// Create a new assistant client with the given configuration.
    pub fn new(config: AssistantConfig) -> Result<Self, AssistantError> {
        if config.api_key.is_empty() {
            return Err(AssistantError::MissingApiKey);
        }

        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self { http, config })
    }

    pub fn from_app_config(config: &AppConfig) -> Result<Self, AssistantError> {
        Self::new(AssistantConfig::from_app_config(config)?)
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Ask one question and return the reply text.
    pub async fn ask(&self, question: &str) -> Result<String, AssistantError> {
        let body = GenerateRequest::new(question, PERSONA)?;
        let start = Instant::now();

        tracing::debug!(model = %self.config.model, chars = question.chars().count(), "asking assistant");

        let http_response = self
            .http
            .post(self.config.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .header(header::USER_AGENT, &self.config.user_agent)
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = http_response.status();
        let bytes = http_response.bytes().await?;

        tracing::debug!(status = status.as_u16(), elapsed_ms = start.elapsed().as_millis() as u64, "assistant responded");

        if !status.is_success() {
            let message = ApiErrorBody::message_or(&bytes, status.as_u16());
            return Err(match status.as_u16() {
                401 | 403 => AssistantError::Auth(message),
                429 => AssistantError::RateLimited(message),
                code => AssistantError::Http { status: code, message },
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_slice(&bytes).map_err(|e| AssistantError::Parse(e.to_string()))?;

        Ok(parsed.first_text().unwrap_or(FALLBACK_REPLY).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "test-model";

    fn client_for(server: &MockServer) -> AssistantClient {
        AssistantClient::new(AssistantConfig {
            api_key: "secret".into(),
            base_url: server.uri(),
            model: MODEL.into(),
            timeout: Duration::from_secs(5),
            ..Default::default()
        })
        .unwrap()
    }

    fn endpoint() -> String {
        format!("/models/{MODEL}:generateContent")
    }

    #[test]
    fn test_missing_key() {
        assert!(matches!(AssistantClient::new(AssistantConfig::default()), Err(AssistantError::MissingApiKey)));
        assert!(matches!(
            AssistantConfig::from_app_config(&AppConfig { assistant_api_key: Some(String::new()), ..Default::default() }),
            Err(AssistantError::MissingApiKey)
        ));
    }

    #[test]
    fn test_config_from_app_config() {
        let app = AppConfig { assistant_api_key: Some("k".into()), timeout_ms: 1000, ..Default::default() };
        let config = AssistantConfig::from_app_config(&app).unwrap();
        assert_eq!(config.model, "gemini-2.5-flash-preview-09-2025");
        assert_eq!(config.timeout, Duration::from_secs(1));
        assert_eq!(
            config.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-09-2025:generateContent"
        );
    }

    #[tokio::test]
    async fn test_ask_returns_reply_unmodified() {
        let server = MockServer::start().await;
        let reply = "I have **3 years** at `AWS`.\nSee https://example.com";
        Mock::given(method("POST"))
            .and(path(endpoint()))
            .and(query_param("key", "secret"))
            .and(body_partial_json(json!({
                "contents": [{ "parts": [{ "text": "experience?" }] }],
                "systemInstruction": { "parts": [{ "text": PERSONA }] }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": reply }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(client_for(&server).ask("experience?").await.unwrap(), reply);
    }

    #[tokio::test]
    async fn test_ask_without_candidates_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(endpoint()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        assert_eq!(client_for(&server).ask("hello").await.unwrap(), FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_ask_maps_statuses() {
        let cases = [
            (401, json!({ "error": { "message": "bad key" } })),
            (429, json!({ "error": { "message": "Resource has been exhausted (e.g. check quota)." } })),
            (500, json!({})),
        ];

        for (status, body) in cases {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path(endpoint()))
                .respond_with(ResponseTemplate::new(status).set_body_json(body))
                .mount(&server)
                .await;

            let err = client_for(&server).ask("hello").await.unwrap_err();
            match status {
                401 => assert!(matches!(err, AssistantError::Auth(ref m) if m == "bad key")),
                429 => assert_eq!(err.user_message(), "Rate limit exceeded. Please try again in a moment."),
                _ => {
                    assert!(matches!(err, AssistantError::Http { status: 500, ref message } if message == "API Error: 500"));
                    assert_eq!(err.user_message(), "Connection Error: API Error: 500");
                }
            }
        }
    }

    #[tokio::test]
    async fn test_blank_question_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

        let err = client_for(&server).ask("   ").await.unwrap_err();
        assert!(matches!(err, AssistantError::InvalidQuestion(_)));
    }
}
