//! Error types for vx-telephony

use thiserror::Error;

/// vx-telephony error type
#[derive(Error, Debug)]
pub enum TelephonyError {
    #[error("Twilio API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TelephonyError>;
