//! Error types for vx-api

use thiserror::Error;

/// Failure of one stage of the voice turn pipeline
///
/// The webhook response never distinguishes these; they exist so logs and
/// tests can tell which stage broke a turn.
#[derive(Error, Debug)]
pub enum TurnError {
    #[error("completion stage failed: {0}")]
    Completion(#[source] vx_core::Error),

    #[error("synthesis stage failed: {0}")]
    Synthesis(#[source] vx_voice::VoiceError),

    #[error("audio write failed: {0}")]
    Io(#[source] std::io::Error),

    #[error("transcode stage failed: {0}")]
    Transcode(#[source] vx_voice::VoiceError),
}
