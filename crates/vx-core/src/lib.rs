//! vx-core: Voice Gateway Core Library
//!
//! Configuration loading and the chat-completion client shared by the
//! rest of the workspace.

pub mod config;
pub mod error;
pub mod llm;

pub use config::{Config, LlmConfig, ServerConfig, TtsSettings, TwilioSettings};
pub use error::{Error, Result};
pub use llm::{ChatMessage, CompletionClient};
