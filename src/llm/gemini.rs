//! Blocking HTTP client for the Gemini `generateContent` endpoint.

use reqwest::blocking::Client;
use std::time::Duration;

use super::credentials::ApiKeyStore;
use super::types::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use crate::error::{Result, ThinkmodeError};

/// Returned in place of an empty model answer.
pub const NO_RESPONSE_TEXT: &str = "Error: No response generated.";

const API_KEY_HEADER: &str = "x-goog-api-key";
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_base: String,
    keys: ApiKeyStore,
}

impl GeminiClient {
    /// Build a client. No request is made and no key is needed yet.
    pub fn new(api_base: &str, timeout: Duration, keys: ApiKeyStore) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            keys,
        })
    }

    pub fn keys(&self) -> &ApiKeyStore {
        &self.keys
    }

    /// URL of the generateContent call for `model`.
    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }

    /// Send `prompt` as a single user turn and return the answer text.
    ///
    /// # Errors
    ///
    /// - `MissingApiKey` before any network traffic if no key resolves
    /// - `RemoteStatus` for non-2xx responses (rate limits, unknown model, ...)
    /// - `Http` / `Json` for transport and decoding failures
    pub fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let key = self.keys.resolve()?;
        log::debug!("generateContent model={} prompt_chars={}", model, prompt.len());

        let response = self
            .http
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, key)
            .json(&GenerateContentRequest::user_text(prompt))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(ThinkmodeError::RemoteStatus {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        Ok(answer_or_placeholder(parsed.text()))
    }
}

fn answer_or_placeholder(text: String) -> String {
    if text.trim().is_empty() {
        NO_RESPONSE_TEXT.to_string()
    } else {
        text
    }
}

/// Human-readable message from an error response body.
fn error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(body) {
        if !envelope.error.message.is_empty() {
            return envelope.error.message;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no details provided".to_string();
    }
    let mut snippet: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    if trimmed.chars().count() > MAX_ERROR_BODY_CHARS {
        snippet.push_str("...");
    }
    snippet
}
