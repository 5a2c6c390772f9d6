//! Configuration management
//!
//! Settings are resolved in the following order:
//! 1. Environment variables
//! 2. voice-gateway.toml configuration file
//! 3. Default values
//!
//! Inside the configuration file, `${VAR_NAME}` expands to the value of the
//! named environment variable.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Error;

/// Chat-completion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key
    #[serde(default)]
    pub api_key: String,

    /// Model to use
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Base URL (optional, for custom endpoints)
    pub base_url: Option<String>,

    /// System persona prepended to every turn
    #[serde(default = "default_persona")]
    pub persona: String,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_llm_model(),
            base_url: None,
            persona: default_persona(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

/// Speech-synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsSettings {
    /// API key
    #[serde(default)]
    pub api_key: String,

    /// Voice identifier
    #[serde(default)]
    pub voice_id: String,

    /// Base URL (optional, for custom endpoints)
    pub base_url: Option<String>,

    /// Synthesis model
    #[serde(default = "default_tts_model")]
    pub model: String,

    /// Voice stability (0.0 - 1.0)
    #[serde(default = "default_stability")]
    pub stability: f32,

    /// Similarity boost (0.0 - 1.0)
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,

    /// Request timeout in seconds
    #[serde(default = "default_tts_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TtsSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            voice_id: String::new(),
            base_url: None,
            model: default_tts_model(),
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
            timeout_secs: default_tts_timeout_secs(),
        }
    }
}

/// Telephony provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwilioSettings {
    /// Account SID
    #[serde(default)]
    pub account_sid: String,

    /// Auth token
    #[serde(default)]
    pub auth_token: String,

    /// Caller ID for outbound calls
    #[serde(default)]
    pub from_number: String,

    /// Destination for the outbound call trigger
    #[serde(default)]
    pub to_number: String,

    /// Base URL (optional, for stub endpoints)
    pub base_url: Option<String>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Externally reachable base URL, used inside TwiML playback links
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory for per-turn audio files
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,

    /// Greeting substituted when the webhook carries no utterance
    #[serde(default = "default_greeting")]
    pub default_greeting: String,

    /// Transcode timeout in seconds
    #[serde(default = "default_transcode_timeout_secs")]
    pub transcode_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            base_url: default_base_url(),
            audio_dir: default_audio_dir(),
            default_greeting: default_greeting(),
            transcode_timeout_secs: default_transcode_timeout_secs(),
        }
    }
}

/// Main configuration for the voice gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chat-completion configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Speech-synthesis configuration
    #[serde(default)]
    pub tts: TtsSettings,

    /// Telephony provider configuration
    #[serde(default)]
    pub twilio: TwilioSettings,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_llm_model() -> String {
    "gpt-4".to_string()
}

fn default_persona() -> String {
    "You are Angela, a calm and friendly business assistant from Apex Spark Media. \
     Speak professionally and clearly."
        .to_string()
}

fn default_llm_timeout_secs() -> u64 {
    30
}

fn default_tts_model() -> String {
    "eleven_monolingual_v1".to_string()
}

fn default_stability() -> f32 {
    0.5
}

fn default_similarity_boost() -> f32 {
    0.75
}

fn default_tts_timeout_secs() -> u64 {
    60
}

fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    format!("http://localhost:{}", default_port())
}

fn default_audio_dir() -> String {
    "data/audio".to_string()
}

fn default_greeting() -> String {
    "Hello, how can I help you today?".to_string()
}

fn default_transcode_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Expand `${VAR_NAME}` references to environment variable values
    ///
    /// Unset variables expand to an empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next(); // consume '{'

                let mut var_name = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '}' {
                        chars.next(); // consume '}'
                        break;
                    }
                    var_name.push(chars.next().unwrap());
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Parse configuration from a TOML string
    ///
    /// `${VAR_NAME}` references are expanded before parsing. Environment
    /// variables still take precedence over file values.
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let expanded = Self::expand_env_vars(content);

        let mut cfg: Config = toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        cfg.apply_env_overrides();
        cfg.validate()?;

        Ok(cfg)
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml_str(&content)
    }

    /// Load configuration from the default locations
    ///
    /// Tries `./voice-gateway.toml` first, then falls back to environment
    /// variables only.
    pub fn load() -> crate::Result<Self> {
        if Path::new("voice-gateway.toml").exists() {
            return Self::from_toml_file("voice-gateway.toml");
        }

        Self::from_env()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut cfg = Config::default();
        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Overwrite settings from environment variables
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.llm.api_key = key;
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            if !model.is_empty() {
                self.llm.model = model;
            }
        }
        if let Ok(url) = std::env::var("LLM_BASE_URL") {
            if !url.is_empty() {
                self.llm.base_url = Some(url);
            }
        }
        if let Ok(persona) = std::env::var("LLM_PERSONA") {
            if !persona.is_empty() {
                self.llm.persona = persona;
            }
        }

        if let Ok(key) = std::env::var("ELEVENLABS_API_KEY") {
            self.tts.api_key = key;
        }
        if let Ok(voice) = std::env::var("ELEVENLABS_VOICE_ID") {
            self.tts.voice_id = voice;
        }
        if let Ok(url) = std::env::var("TTS_BASE_URL") {
            if !url.is_empty() {
                self.tts.base_url = Some(url);
            }
        }

        if let Ok(sid) = std::env::var("TWILIO_ACCOUNT_SID") {
            self.twilio.account_sid = sid;
        }
        if let Ok(token) = std::env::var("TWILIO_AUTH_TOKEN") {
            self.twilio.auth_token = token;
        }
        if let Ok(from) = std::env::var("TWILIO_PHONE_NUMBER") {
            self.twilio.from_number = from;
        }
        if let Ok(to) = std::env::var("MY_PHONE_NUMBER") {
            self.twilio.to_number = to;
        }

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(url) = std::env::var("BASE_URL") {
            if !url.is_empty() {
                self.server.base_url = url;
            }
        }
        if let Ok(dir) = std::env::var("AUDIO_DIR") {
            if !dir.is_empty() {
                self.server.audio_dir = dir;
            }
        }
    }

    /// Reject configurations that cannot serve a single turn
    ///
    /// Phone numbers are deliberately not validated here; a missing
    /// destination surfaces as an error from the call trigger instead.
    fn validate(&self) -> crate::Result<()> {
        if self.llm.api_key.is_empty() {
            return Err(Error::Config(
                "OPENAI_API_KEY (llm.api_key) not set".to_string(),
            ));
        }
        if self.tts.api_key.is_empty() {
            return Err(Error::Config(
                "ELEVENLABS_API_KEY (tts.api_key) not set".to_string(),
            ));
        }
        if self.tts.voice_id.is_empty() {
            return Err(Error::Config(
                "ELEVENLABS_VOICE_ID (tts.voice_id) not set".to_string(),
            ));
        }
        if self.twilio.account_sid.is_empty() {
            return Err(Error::Config(
                "TWILIO_ACCOUNT_SID (twilio.account_sid) not set".to_string(),
            ));
        }
        if self.twilio.auth_token.is_empty() {
            return Err(Error::Config(
                "TWILIO_AUTH_TOKEN (twilio.auth_token) not set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_unset_var_is_empty() {
        let expanded = Config::expand_env_vars("key = \"${VX_TEST_UNSET_VAR_XYZ}\"");
        assert_eq!(expanded, "key = \"\"");
    }

    #[test]
    fn test_expand_leaves_plain_text() {
        let input = "port = 3000 # $100, not a reference";
        assert_eq!(Config::expand_env_vars(input), input);
    }

    #[test]
    fn test_from_toml_str_full() {
        let cfg = Config::from_toml_str(
            r#"
            [llm]
            api_key = "sk-test"
            model = "gpt-4"

            [tts]
            api_key = "el-test"
            voice_id = "voice-123"
            stability = 0.4

            [twilio]
            account_sid = "AC123"
            auth_token = "token"
            from_number = "+15550001111"
            to_number = "+15550002222"

            [server]
            port = 8080
            base_url = "https://example.ngrok.io"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.llm.model, "gpt-4");
        assert_eq!(cfg.tts.voice_id, "voice-123");
        assert_eq!(cfg.tts.stability, 0.4);
        // untouched defaults
        assert_eq!(cfg.tts.similarity_boost, 0.75);
        assert_eq!(cfg.tts.model, "eleven_monolingual_v1");
        assert_eq!(cfg.twilio.to_number, "+15550002222");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.base_url, "https://example.ngrok.io");
        assert_eq!(cfg.server.audio_dir, "data/audio");
    }

    #[test]
    fn test_missing_llm_key_is_config_error() {
        let result = Config::from_toml_str(
            r#"
            [tts]
            api_key = "el-test"
            voice_id = "voice-123"

            [twilio]
            account_sid = "AC123"
            auth_token = "token"
            "#,
        );

        // May pass if the surrounding environment provides OPENAI_API_KEY;
        // otherwise it must be a Config error naming the key.
        if std::env::var("OPENAI_API_KEY").is_err() {
            match result {
                Err(Error::Config(msg)) => assert!(msg.contains("OPENAI_API_KEY")),
                other => panic!("expected Config error, got {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_missing_phone_numbers_are_accepted() {
        let cfg = Config::from_toml_str(
            r#"
            [llm]
            api_key = "sk-test"

            [tts]
            api_key = "el-test"
            voice_id = "voice-123"

            [twilio]
            account_sid = "AC123"
            auth_token = "token"
            "#,
        )
        .unwrap();

        if std::env::var("MY_PHONE_NUMBER").is_err() {
            assert!(cfg.twilio.to_number.is_empty());
        }
    }

    #[test]
    fn test_default_greeting() {
        let server = ServerConfig::default();
        assert_eq!(server.default_greeting, "Hello, how can I help you today?");
        assert_eq!(server.transcode_timeout_secs, 30);
    }
}
