//! Text-to-Speech synthesis
//!
//! Supports two providers:
//! - ElevenLabs API (primary)
//! - OpenAI-compatible TTS endpoints

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, VoiceError};

/// TTS API provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    /// ElevenLabs API
    #[default]
    ElevenLabs,
    /// OpenAI TTS API
    OpenAi,
}

/// TTS configuration
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// API key
    pub api_key: String,
    /// Provider to use
    pub provider: TtsProvider,
    /// Model to use
    pub model: String,
    /// Voice identifier (ElevenLabs voice id, or OpenAI voice name)
    pub voice_id: String,
    /// Voice stability (0.0 - 1.0, ElevenLabs only)
    pub stability: f32,
    /// Similarity boost (0.0 - 1.0, ElevenLabs only)
    pub similarity_boost: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Base URL override (stub endpoints, self-hosted gateways)
    pub base_url: Option<String>,
}

impl TtsConfig {
    /// Create a new ElevenLabs TTS configuration
    pub fn elevenlabs(api_key: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            provider: TtsProvider::ElevenLabs,
            model: "eleven_monolingual_v1".to_string(),
            voice_id: voice_id.into(),
            stability: 0.5,
            similarity_boost: 0.75,
            timeout_secs: 60,
            base_url: None,
        }
    }

    /// Create a new OpenAI TTS configuration
    pub fn openai(api_key: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            provider: TtsProvider::OpenAi,
            model: "tts-1".to_string(),
            voice_id: voice.into(),
            stability: 0.5,
            similarity_boost: 0.75,
            timeout_secs: 60,
            base_url: None,
        }
    }

    /// Set the synthesis model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set ElevenLabs voice settings
    pub fn with_voice_settings(mut self, stability: f32, similarity_boost: f32) -> Self {
        self.stability = stability.clamp(0.0, 1.0);
        self.similarity_boost = similarity_boost.clamp(0.0, 1.0);
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Get the API base URL for the provider
    pub fn base_url(&self) -> &str {
        match (&self.base_url, self.provider) {
            (Some(url), _) => url,
            (None, TtsProvider::ElevenLabs) => "https://api.elevenlabs.io/v1",
            (None, TtsProvider::OpenAi) => "https://api.openai.com/v1",
        }
    }
}

/// TTS synthesis result
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Audio data as returned by the provider
    pub audio_data: Vec<u8>,
    /// Content type reported by the provider
    pub content_type: String,
}

/// TTS client for speech synthesis
pub struct TtsClient {
    client: Client,
    config: TtsConfig,
}

impl TtsClient {
    /// Create a new TTS client
    pub fn new(config: TtsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VoiceError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Synthesize speech from text
    pub async fn synthesize(&self, text: &str) -> Result<SynthesisResult> {
        match self.config.provider {
            TtsProvider::ElevenLabs => self.synthesize_elevenlabs(text).await,
            TtsProvider::OpenAi => self.synthesize_openai(text).await,
        }
    }

    /// Synthesize using the ElevenLabs API
    async fn synthesize_elevenlabs(&self, text: &str) -> Result<SynthesisResult> {
        let url = format!(
            "{}/text-to-speech/{}",
            self.config.base_url(),
            self.config.voice_id
        );

        info!("Synthesizing speech: {} chars using ElevenLabs", text.len());
        debug!("Model: {}, Voice: {}", self.config.model, self.config.voice_id);

        let body = serde_json::json!({
            "text": text,
            "model_id": self.config.model,
            "voice_settings": {
                "stability": self.config.stability,
                "similarity_boost": self.config.similarity_boost,
            }
        });

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| VoiceError::ApiError(format!("Request failed: {}", e)))?;

        self.read_audio_response(response).await
    }

    /// Synthesize using an OpenAI-compatible TTS API
    async fn synthesize_openai(&self, text: &str) -> Result<SynthesisResult> {
        let url = format!("{}/audio/speech", self.config.base_url());

        info!("Synthesizing speech: {} chars using OpenAI", text.len());

        let body = serde_json::json!({
            "model": self.config.model,
            "input": text,
            "voice": self.config.voice_id,
            "response_format": "mp3",
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| VoiceError::ApiError(format!("Request failed: {}", e)))?;

        self.read_audio_response(response).await
    }

    /// Check status and collect the raw audio bytes
    async fn read_audio_response(&self, response: reqwest::Response) -> Result<SynthesisResult> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VoiceError::SynthesisFailed(format!(
                "API error {}: {}",
                status, error_text
            )));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| VoiceError::SynthesisFailed(format!("Failed to read audio data: {}", e)))?;

        if audio_data.is_empty() {
            return Err(VoiceError::SynthesisFailed(
                "Provider returned an empty audio body".to_string(),
            ));
        }

        info!(
            "Synthesis complete: {} bytes, content-type: {}",
            audio_data.len(),
            content_type
        );

        Ok(SynthesisResult {
            audio_data: audio_data.to_vec(),
            content_type,
        })
    }
}
