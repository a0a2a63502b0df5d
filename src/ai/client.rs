use crate::error::ClientError;
use openrouter_api::{
    models::provider_preferences::ProviderPreferences,
    models::provider_preferences::ProviderSort,
    types::chat::{ChatCompletionRequest, Message},
};
use serde::Serialize;

pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Sampling used when generating quizzes; variety matters more than precision.
pub const GENERATION_TEMPERATURE: f32 = 1.0;
/// Sampling used when grading.
pub const GRADING_TEMPERATURE: f32 = 0.5;

#[derive(Debug)]
pub struct OpenRouterClient {
    client: openrouter_api::OpenRouterClient<openrouter_api::Ready>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelConfig {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ModelConfig {
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            temperature: None,
            max_tokens: Some(max_tokens),
        }
    }

    pub fn with_temperature(&self, temperature: f32) -> Self {
        Self {
            temperature: Some(temperature),
            ..self.clone()
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL, DEFAULT_MAX_TOKENS)
    }
}

impl OpenRouterClient {
    /// Reads `OPENROUTER_API_KEY` from the environment.
    pub fn new() -> Result<Self, ClientError> {
        let client = openrouter_api::OpenRouterClient::quick()
            .map_err(|e| ClientError::Setup(e.to_string()))?;

        Ok(Self { client })
    }

    /// Send one system + user exchange and return the reply text.
    pub async fn complete(
        &self,
        system: &str,
        prompt: &str,
        config: &ModelConfig,
    ) -> Result<String, ClientError> {
        let messages = vec![Message::text("system", system), Message::text("user", prompt)];

        let provider = ProviderPreferences::new().with_sort(ProviderSort::Throughput);

        let request = ChatCompletionRequest {
            model: config.model.clone(),
            messages,
            provider: Some(provider),
            stream: None,
            response_format: None,
            tools: None,
            tool_choice: None,
            models: None,
            transforms: None,
            route: None,
            user: None,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: None,
            top_k: None,
            frequency_penalty: None,
            presence_penalty: None,
            repetition_penalty: None,
            min_p: None,
            top_a: None,
            seed: None,
            stop: None,
            logit_bias: None,
            logprobs: None,
            top_logprobs: None,
            prediction: None,
            parallel_tool_calls: None,
            verbosity: None,
        };

        let response = self
            .client
            .chat()
            .map_err(|e| ClientError::Api(e.to_string()))?
            .chat_completion(request)
            .await
            .map_err(|e| ClientError::Api(e.to_string()))?;

        let choice = response.choices.first().ok_or(ClientError::EmptyResponse)?;
        let text = match &choice.message.content {
            openrouter_api::MessageContent::Text(text) => text.clone(),
            openrouter_api::MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|p| match p {
                    openrouter_api::ContentPart::Text(tc) => Some(tc.text.clone()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        };

        if text.trim().is_empty() {
            return Err(ClientError::EmptyResponse);
        }
        Ok(text)
    }
}
