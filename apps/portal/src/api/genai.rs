//! Generative-AI client speaking the `generateContent` REST shape.
//!
//! Used by the chat assistant, the objective suggestion button and the
//! requests AI search. The client only moves text around; interpreting the
//! model output is left to the callers in `services`.

use std::sync::Arc;

use anyhow::Context;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;
use thiserror::Error;

use crate::config::AppConfig;

pub type GenAiResult<T> = Result<T, GenAiError>;

pub const CHAT_SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant for Sato Pharma, a pharmaceutical company. Be concise and professional.";

#[derive(Clone)]
pub struct GenAiClient {
    inner: reqwest::Client,
    config: Arc<AppConfig>,
}

impl GenAiClient {
    pub fn new(config: AppConfig) -> GenAiResult<Self> {
        if config.genai_api_key.is_none() {
            return Err(GenAiError::MissingApiKey);
        }

        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.request_timeout);

        let client = builder
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            inner: client,
            config: Arc::new(config),
        })
    }

    pub fn model(&self) -> &str {
        &self.config.genai_model
    }

    pub async fn generate_text(&self, prompt: &str) -> GenAiResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            system_instruction: None,
            generation_config: None,
        };
        self.generate(&request).await
    }

    /// Asks for a JSON answer constrained by `schema`; the raw JSON text is
    /// returned for the caller to decode.
    pub async fn generate_json(&self, prompt: &str, schema: Value) -> GenAiResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
            }),
        };
        self.generate(&request).await
    }

    async fn generate(&self, request: &GenerateContentRequest) -> GenAiResult<String> {
        let api_key = self
            .config
            .genai_api_key
            .as_deref()
            .ok_or(GenAiError::MissingApiKey)?;

        let response = self
            .inner
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(GenAiError::from_error_body(status, &bytes));
        }

        let payload: GenerateContentResponse = serde_json::from_slice(&bytes)?;
        payload.first_text().ok_or(GenAiError::EmptyCandidate)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.genai_base_url.trim_end_matches('/'),
            self.config.genai_model
        )
    }
}

/// Multi-turn conversation state. History only ever holds completed
/// user/model pairs.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatSession {
    system_instruction: String,
    history: Vec<Content>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(CHAT_SYSTEM_INSTRUCTION)
    }
}

impl ChatSession {
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            history: Vec::new(),
        }
    }

    pub fn request_for(&self, message: &str) -> GenerateContentRequest {
        let mut contents = self.history.clone();
        contents.push(Content::user(message));
        GenerateContentRequest {
            contents,
            system_instruction: Some(Content::system(&self.system_instruction)),
            generation_config: None,
        }
    }

    pub fn record_exchange(&mut self, message: &str, reply: &str) {
        self.history.push(Content::user(message));
        self.history.push(Content::model(reply));
    }

    pub async fn send_message(&mut self, client: &GenAiClient, message: &str) -> GenAiResult<String> {
        let request = self.request_for(message);
        let reply = client.generate(&request).await?;
        self.record_exchange(message, &reply);
        Ok(reply)
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Option<Content>,
    pub generation_config: Option<GenerationConfig>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: Option<String>,
    pub response_schema: Option<Value>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: &str) -> Self {
        Self::with_role(Some("user"), text)
    }

    pub fn model(text: &str) -> Self {
        Self::with_role(Some("model"), text)
    }

    pub fn system(text: &str) -> Self {
        Self::with_role(None, text)
    }

    fn with_role(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }

    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    pub fn first_text(&self) -> Option<String> {
        self.candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .map(Content::text)
            .find(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}

#[derive(Error, Debug)]
pub enum GenAiError {
    #[error("AI service is not configured")]
    MissingApiKey,
    #[error(transparent)]
    Setup(#[from] anyhow::Error),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("AI service returned {status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("AI service returned no text")]
    EmptyCandidate,
}

impl GenAiError {
    fn from_error_body(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorEnvelope>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned());
        Self::Api { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn configured() -> AppConfig {
        let mut config = AppConfig::default();
        config.genai_api_key = Some("test-key".into());
        config.genai_base_url = "https://ai.example.com/v1beta/".into();
        config
    }

    #[test]
    fn client_requires_api_key() {
        assert!(matches!(
            GenAiClient::new(AppConfig::default()),
            Err(GenAiError::MissingApiKey)
        ));
        let client = GenAiClient::new(configured()).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://ai.example.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn json_request_serializes_generation_config() {
        let request = GenerateContentRequest {
            contents: vec![Content::user("find approved requests")],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".into()),
                response_schema: Some(json!({ "type": "OBJECT" })),
            }),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "find approved requests" }] }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": { "type": "OBJECT" }
                }
            })
        );
    }

    #[test]
    fn chat_request_carries_history_and_system_instruction() {
        let mut session = ChatSession::default();
        session.record_exchange("Hi", "Hello, how can I help?");

        let request = session.request_for("Show pending requests");
        assert_eq!(request.contents.len(), 3);
        assert_eq!(request.contents[1].role.as_deref(), Some("model"));
        assert_eq!(request.contents[2].text(), "Show pending requests");
        let system = request.system_instruction.unwrap();
        assert!(system.role.is_none());
        assert_eq!(system.text(), CHAT_SYSTEM_INSTRUCTION);
        assert_eq!(session.request_for("again").contents.len(), 3);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn failed_send_leaves_history_untouched() {
        let mut config = configured();
        config.genai_base_url = "http://127.0.0.1:9/v1beta".into();
        config.request_timeout = std::time::Duration::from_secs(2);
        let client = GenAiClient::new(config).unwrap();

        let mut session = ChatSession::default();
        session.record_exchange("Hi", "Hello, how can I help?");
        let before = session.clone();

        let result = session.send_message(&client, "Show pending requests").await;
        assert!(matches!(result, Err(GenAiError::Transport(_))));
        assert_eq!(session, before);
    }

    #[test]
    fn response_text_skips_empty_candidates() {
        let payload: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [] } },
                { "content": { "role": "model", "parts": [{ "text": "Approval " }, { "text": "rate is 50%" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(payload.first_text().as_deref(), Some("Approval rate is 50%"));

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.first_text().is_none());
    }

    #[test]
    fn api_errors_prefer_structured_message() {
        let body = br#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        let err = GenAiError::from_error_body(StatusCode::BAD_REQUEST, body);
        assert_eq!(
            err.to_string(),
            "AI service returned 400 Bad Request: API key not valid"
        );

        let err = GenAiError::from_error_body(StatusCode::BAD_GATEWAY, b"upstream timeout");
        assert!(err.to_string().ends_with("upstream timeout"));
    }
}
