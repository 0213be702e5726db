use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::{
    config::DEFAULT_MODEL,
    core::{prompt::island_for_guesthouse, prompt::render_prompt, request::ItineraryParameters},
    error::Result,
    schemas::{validate_structured_payload, CompletionSchema, SchemaHandle},
    services::openai_client::{extract_message_content, ChatCompletionRequest, CompletionProvider},
    types::Itinerary,
};

pub const DEFAULT_TEMPERATURE: f64 = 0.4;
pub const DEFAULT_MAX_TOKENS: u32 = 1200;

/// Builds the concierge prompt, calls the provider once and returns its JSON.
#[derive(Debug, Clone)]
pub struct ItineraryComposer {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    temperature: f64,
    max_tokens: u32,
    completion_schema: Option<SchemaHandle>,
}

impl ItineraryComposer {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            completion_schema: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Check provider output against the [`Itinerary`] schema before returning it.
    pub fn with_schema_validation(mut self, enabled: bool) -> Self {
        self.completion_schema = enabled.then(|| Itinerary::schema().clone());
        self
    }

    pub fn validates_schema(&self) -> bool {
        self.completion_schema.is_some()
    }

    /// The exact request sent upstream for these parameters.
    pub fn build_request(&self, params: &ItineraryParameters) -> ChatCompletionRequest {
        let messages = vec![json!({
            "role": "user",
            "content": render_prompt(params),
        })];

        ChatCompletionRequest::new(self.model.clone(), messages)
            .with_temperature(self.temperature)
            .with_json_object_response()
            .with_max_tokens(Some(self.max_tokens))
    }

    pub async fn compose(&self, params: &ItineraryParameters) -> Result<Value> {
        info!(days = params.days, style = %params.style, "composing itinerary");

        let request = self.build_request(params);
        let response = self.provider.chat_completion(&request).await?;
        let content = extract_message_content(&response)?;
        let itinerary: Value = serde_json::from_str(content)?;

        if let Some(schema) = &self.completion_schema {
            validate_structured_payload(schema, &itinerary)?;
        }

        if let Some(hotel) = itinerary.get("hotel_name").and_then(Value::as_str) {
            if island_for_guesthouse(hotel).is_none() {
                warn!(hotel_name = %hotel, "provider picked a guesthouse outside the verified list");
            }
        }

        debug!(
            trip_length_days = ?itinerary.get("trip_length_days"),
            "itinerary received"
        );
        Ok(itinerary)
    }
}
