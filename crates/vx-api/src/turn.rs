//! One voice turn: utterance in, playable telephony audio out
//!
//! The pipeline is strictly sequential: completion, synthesis, file write,
//! transcode. The first failing stage aborts the turn; partially written
//! files are discarded.

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::TurnError;
use crate::server::AppState;

/// Incoming webhook form fields
#[derive(Debug, Default, serde::Deserialize)]
pub struct VoiceWebhookForm {
    #[serde(rename = "SpeechResult")]
    pub speech_result: Option<String>,
    #[serde(rename = "Body")]
    pub body: Option<String>,
}

impl VoiceWebhookForm {
    /// The caller utterance, falling back to the configured greeting
    pub fn utterance_or<'a>(&'a self, default_greeting: &'a str) -> &'a str {
        [self.speech_result.as_deref(), self.body.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(default_greeting)
    }
}

/// Run one turn of the voice pipeline
///
/// Returns the id under which the transcoded audio is served.
pub async fn run_turn(state: &AppState, utterance: &str) -> Result<Uuid, TurnError> {
    let turn_id = state.store.new_turn();
    debug!(%turn_id, utterance, "Starting voice turn");

    let reply = state
        .completion
        .reply(utterance)
        .await
        .map_err(TurnError::Completion)?;
    info!(%turn_id, "Reply: {}", reply);

    let synthesized = state
        .tts
        .synthesize(&reply)
        .await
        .map_err(TurnError::Synthesis)?;

    let source = state
        .store
        .write_source(turn_id, &synthesized.audio_data)
        .await
        .map_err(|e| match e {
            vx_voice::VoiceError::IoError(io) => TurnError::Io(io),
            other => TurnError::Synthesis(other),
        })?;

    let wav = state.store.wav_path(turn_id);
    if let Err(e) = state.transcoder.to_telephony_wav(&source, &wav).await {
        state.store.discard(turn_id).await;
        return Err(TurnError::Transcode(e));
    }

    state.store.mark_ready(turn_id).await;
    info!(%turn_id, "Voice turn complete");

    Ok(turn_id)
}

/// Playback URL for a completed turn
pub fn playback_url(state: &AppState, turn_id: Uuid) -> String {
    format!("{}/audio/{}", state.config.server.base_url, turn_id)
}
