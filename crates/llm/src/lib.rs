//! Text generation providers.
//!
//! The recommender talks to an external text-generation service twice per
//! request: once to turn the user's goals into a constraints object and once
//! to explain the picks. This crate hides the service behind
//! [`TextGenerator`] so the pipeline can run against a local
//! OpenAI-compatible server or a deterministic fake.

mod fake;
mod json;
mod openai;

pub use fake::FakeProvider;
pub use json::{first_json_object, strip_think};
pub use openai::OpenAiProvider;

use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Sampling parameters for a single completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            temperature: 0.2,
        }
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync + fmt::Debug {
    /// Send a single user prompt and return the model's final text.
    async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String, LlmError>;

    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderKind {
    /// Any server speaking the OpenAI chat completions API (vLLM, Ollama,
    /// llama.cpp, OpenAI itself).
    OpenAi,
    Fake,
}

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

pub fn create_provider(settings: &ProviderSettings) -> Result<Arc<dyn TextGenerator>, LlmError> {
    let provider: Arc<dyn TextGenerator> = match settings.kind {
        ProviderKind::Fake => Arc::new(FakeProvider::default()),
        ProviderKind::OpenAi => {
            if settings.base_url.trim().is_empty() {
                return Err(LlmError::NotConfigured("llm.base_url is empty".to_string()));
            }
            Arc::new(OpenAiProvider::new(
                &settings.base_url,
                &settings.model,
                settings.api_key.clone(),
                settings.timeout,
            )?)
        }
    };

    tracing::info!(
        provider = provider.provider_name(),
        model = provider.model_name(),
        "Text generation provider ready"
    );

    Ok(provider)
}
