use std::sync::Arc;

use ai::{
    chat_completions::{ChatCompletion, ChatCompletionMessage, ChatCompletionRequestBuilder},
    clients::openai::Client,
};
use serde_json::Value;
use standard_error::{Interpolate, StandardError};

use crate::{conf::settings, prelude::Result};

/// Bias towards deterministic output; both prompt sites expect strict JSON.
const SAMPLING_TEMPERATURE: f32 = 0.3;

#[async_trait::async_trait]
pub trait GenerateOps {
    async fn complete(&self, prompt: &str) -> Result<Value>;
}

#[async_trait::async_trait]
impl GenerateOps for Arc<Client> {
    async fn complete(&self, prompt: &str) -> Result<Value> {
        let request = ChatCompletionRequestBuilder::default()
            .model(&settings.ai_model)
            .messages(vec![ChatCompletionMessage::User(prompt.to_owned().into())])
            .temperature(SAMPLING_TEMPERATURE)
            .build()
            .map_err(|e| StandardError::new("ERR-LLM-001").interpolate_err(e.to_string()))?;
        let response = self
            .chat_completions(&request)
            .await
            .map_err(|e| StandardError::new("ERR-LLM-002").interpolate_err(e.to_string()))?;
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_ref())
            .ok_or_else(|| {
                StandardError::new("ERR-LLM-002").interpolate_err("empty completion".into())
            })?;
        let payload = clean_payload(content);
        tracing::debug!("model payload: {}", payload);
        serde_json::from_str(payload)
            .map_err(|e| StandardError::new("ERR-LLM-003").interpolate_err(e.to_string()))
    }
}

/// Models occasionally wrap their JSON in markdown fences despite being
/// told not to.
pub fn clean_payload(content: &str) -> &str {
    content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}
