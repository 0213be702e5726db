//! Outbound integrations

pub mod openai_client;

pub use openai_client::{
    extract_message_content, ChatCompletionRequest, CompletionProvider, OpenAIClient,
};
