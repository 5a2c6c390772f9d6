//! Error types for vx-voice

use thiserror::Error;

/// vx-voice error type
#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("Speech synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Transcode failed: {0}")]
    TranscodeFailed(String),

    #[error("Transcode timed out after {0:?}")]
    TranscodeTimeout(std::time::Duration),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, VoiceError>;
