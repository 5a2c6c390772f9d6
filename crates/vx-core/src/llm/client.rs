//! Chat-completion API HTTP client
//!
//! Talks to OpenAI-compatible `/chat/completions` endpoints.

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::types::*;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat-completion client
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    api_key: String,
    model: String,
    persona: String,
    base_url: String,
}

impl CompletionClient {
    /// Create a new completion client
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(Error::Http)?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            persona: config.persona.clone(),
            base_url,
        })
    }

    /// Create with a custom base URL (for testing or custom endpoints)
    pub fn with_base_url(config: &LlmConfig, base_url: String) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.base_url = base_url;
        Ok(client)
    }

    /// Send a raw chat-completion request
    pub async fn complete(&self, request: ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!("Sending request to completion API: {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            warn!("Completion API error: {} - {}", status, body);
            return Err(Error::CompletionApi(format!("{}: {}", status, body)));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| Error::CompletionApi(format!("Failed to parse response: {} - {}", e, body)))?;

        info!(
            "Completion API response: choices={}, tokens={}",
            parsed.choices.len(),
            parsed.usage.as_ref().map(|u| u.total_tokens).unwrap_or(0)
        );

        Ok(parsed)
    }

    /// Produce a reply to one caller utterance
    ///
    /// Builds the fixed persona + user message pair and extracts the first
    /// choice's text.
    pub async fn reply(&self, utterance: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(&self.persona),
                ChatMessage::user(utterance),
            ],
            max_tokens: None,
        };

        let response = self.complete(request).await?;

        response
            .reply_text()
            .map(|s| s.to_string())
            .ok_or_else(|| Error::CompletionApi("Response contained no reply text".to_string()))
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> LlmConfig {
        LlmConfig {
            api_key: "sk-test".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_reply_extracts_first_choice() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4",
                "messages": [
                    { "role": "system" },
                    { "role": "user", "content": "Hello" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": "Hi, how can I help?" },
                    "finish_reason": "stop"
                }]
            })))
            .mount(&server)
            .await;

        let client = CompletionClient::with_base_url(&test_config(), server.uri()).unwrap();
        let reply = client.reply("Hello").await.unwrap();
        assert_eq!(reply, "Hi, how can I help?");
    }

    #[tokio::test]
    async fn test_non_success_status_is_completion_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
            .mount(&server)
            .await;

        let client = CompletionClient::with_base_url(&test_config(), server.uri()).unwrap();
        let err = client.reply("Hello").await.unwrap_err();
        assert!(matches!(err, Error::CompletionApi(_)));
    }

    #[tokio::test]
    async fn test_missing_reply_text_is_completion_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let client = CompletionClient::with_base_url(&test_config(), server.uri()).unwrap();
        let err = client.reply("Hello").await.unwrap_err();
        assert!(matches!(err, Error::CompletionApi(_)));
    }
}
