//! Remote language-model integration.
//!
//! The rest of the crate sees the model only through the [`Responder`]
//! trait: a prompt goes in, final answer text (or an error) comes out.
//!
//! # Modules
//!
//! - [`credentials`] - API key resolution (session key, then environment)
//! - [`types`] - Wire types for the generateContent endpoint
//! - [`gemini`] - Blocking HTTP client
//! - [`prompts`] - Prompt templates for the two engines
//! - [`responder`] - The `Responder` trait and the fast/reasoning engines

mod credentials;
mod gemini;
mod prompts;
mod responder;
mod types;

pub use credentials::{ApiKeyStore, API_KEY_ENV_VARS};
pub use gemini::{GeminiClient, NO_RESPONSE_TEXT};
pub use prompts::{fast_prompt, reasoning_prompt};
pub use responder::{build_responders, FastResponder, ReasoningResponder, Responder};
pub use types::{GenerateContentRequest, GenerateContentResponse};
