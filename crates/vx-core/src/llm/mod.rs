//! Chat-completion API integration

mod client;
mod types;

pub use client::CompletionClient;
pub use types::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatMessageResponse,
    CompletionUsage,
};
