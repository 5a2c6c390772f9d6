//! vx-telephony: Twilio integration for the voice gateway
//!
//! A REST client for originating calls and a small TwiML builder for the
//! call-flow instructions the webhook returns (`Play`, `Say`).

pub mod error;
pub mod twilio;
pub mod twiml;

pub use error::{Result, TelephonyError};
pub use twilio::TwilioClient;
pub use twiml::{VoiceResponse, TWIML_CONTENT_TYPE};
