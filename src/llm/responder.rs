//! The two response-producing engines.

use std::sync::Arc;
use std::time::Duration;

use super::credentials::ApiKeyStore;
use super::gemini::GeminiClient;
use super::prompts::{fast_prompt, reasoning_prompt};
use crate::config::Config;
use crate::error::Result;

/// An opaque remote operation: prompt in, final text out.
///
/// Implementations must be shareable across threads because both engines of
/// a run are invoked concurrently.
pub trait Responder: Send + Sync {
    fn respond(&self, prompt: &str) -> Result<String>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}

/// Low-latency engine that answers without showing its work.
#[derive(Debug, Clone)]
pub struct FastResponder {
    client: Arc<GeminiClient>,
    model: String,
}

impl FastResponder {
    pub fn new(client: Arc<GeminiClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

impl Responder for FastResponder {
    fn respond(&self, prompt: &str) -> Result<String> {
        self.client
            .generate(&self.model, &fast_prompt(prompt))
            .inspect_err(|e| log::error!("Fast response error: {}", e))
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// Slower engine instructed to reason step by step.
#[derive(Debug, Clone)]
pub struct ReasoningResponder {
    client: Arc<GeminiClient>,
    model: String,
}

impl ReasoningResponder {
    pub fn new(client: Arc<GeminiClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

impl Responder for ReasoningResponder {
    fn respond(&self, prompt: &str) -> Result<String> {
        self.client
            .generate(&self.model, &reasoning_prompt(prompt))
            .inspect_err(|e| log::error!("Thinking response error: {}", e))
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// Build the (fast, reasoning) pair from configuration, sharing one HTTP
/// client and one credential store.
pub fn build_responders(
    config: &Config,
    keys: ApiKeyStore,
) -> Result<(Arc<dyn Responder>, Arc<dyn Responder>)> {
    let client = Arc::new(GeminiClient::new(
        &config.api_base,
        Duration::from_secs(config.request_timeout_secs),
        keys,
    )?);

    let fast: Arc<dyn Responder> =
        Arc::new(FastResponder::new(Arc::clone(&client), &config.fast_model));
    let reasoning: Arc<dyn Responder> =
        Arc::new(ReasoningResponder::new(client, &config.reasoning_model));
    Ok((fast, reasoning))
}
