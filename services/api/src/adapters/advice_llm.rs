//! services/api/src/adapters/advice_llm.rs
//!
//! This module contains the adapter for the fitness-advice LLM.
//! It implements the `AdviceModelService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use gym_trainer_core::ports::{AdviceModelService, PortError, PortResult};

/// Generation bounds for a user-facing request/response endpoint: one
/// attempt, fixed sampling temperature, capped output length.
const ADVICE_TEMPERATURE: f32 = 0.7;
const ADVICE_MAX_TOKENS: u32 = 1000;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `AdviceModelService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiAdviceAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiAdviceAdapter {
    /// Creates a new `OpenAiAdviceAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

//=========================================================================================
// `AdviceModelService` Trait Implementation
//=========================================================================================

#[async_trait]
impl AdviceModelService for OpenAiAdviceAdapter {
    /// Sends the rendered prompt as a single user message and returns the raw
    /// reply text. The prompt itself carries the expert persona and the JSON
    /// shape instructions, so no separate system message is needed.
    async fn generate_advice(&self, prompt: &str) -> PortResult<String> {
        let messages = vec![ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(ADVICE_TEMPERATURE)
            .max_completion_tokens(ADVICE_MAX_TOKENS)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        // Extract the text content from the first choice in the response.
        if let Some(choice) = response.choices.into_iter().next() {
            if let Some(content) = choice.message.content {
                Ok(content)
            } else {
                Err(PortError::Unexpected(
                    "Advice model response contained no text content.".to_string(),
                ))
            }
        } else {
            Err(PortError::Unexpected(
                "Advice model returned no choices in its response.".to_string(),
            ))
        }
    }
}
