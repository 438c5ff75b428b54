//! Fake provider for tests and offline runs.
//!
//! Responses are matched by checking whether the prompt contains a
//! registered substring, so pipelines can run without network access. A
//! prompt that matches nothing fails unless a default response is set, which
//! is what the offline service relies on to fall back to its templated
//! explanation.

use async_trait::async_trait;

use crate::{GenerationOptions, LlmError, TextGenerator};

#[derive(Debug, Clone, Default)]
pub struct FakeProvider {
    /// (prompt substring, response), checked in insertion order
    responses: Vec<(String, String)>,
    default_response: Option<String>,
}

impl FakeProvider {
    /// Provider with no responses; every prompt fails.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, prompt_contains: &str, response: &str) -> Self {
        self.responses
            .push((prompt_contains.to_lowercase(), response.to_string()));
        self
    }

    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }
}

#[async_trait]
impl TextGenerator for FakeProvider {
    async fn generate(&self, prompt: &str, _options: GenerationOptions) -> Result<String, LlmError> {
        let prompt_lower = prompt.to_lowercase();

        if let Some((_, response)) = self
            .responses
            .iter()
            .find(|(pattern, _)| prompt_lower.contains(pattern.as_str()))
        {
            return Ok(response.clone());
        }

        self.default_response.clone().ok_or_else(|| {
            LlmError::RequestFailed(format!(
                "FakeProvider: no response configured for prompt: {}",
                prompt.chars().take(100).collect::<String>()
            ))
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
