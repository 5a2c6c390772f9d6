//! HTTP handlers
//!
//! The webhook handler is the single boundary where pipeline failures
//! collapse into the fixed apology response; callers are never told which
//! stage failed.

use axum::{
    extract::{Form, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::error;
use uuid::Uuid;

use vx_telephony::{VoiceResponse, TWIML_CONTENT_TYPE};

use crate::server::AppState;
use crate::turn::{playback_url, run_turn, VoiceWebhookForm};

/// Spoken when any stage of the turn pipeline fails
const APOLOGY: &str = "Sorry, there was an error processing your request.";

/// Health check endpoint
pub async fn health() -> &'static str {
    "Voice gateway is running."
}

/// Main voice webhook
///
/// Runs one turn and answers with TwiML: `Play` on success, the apology
/// `Say` on any failure.
pub async fn voice_webhook(
    State(state): State<AppState>,
    Form(form): Form<VoiceWebhookForm>,
) -> Response {
    let utterance = form
        .utterance_or(&state.config.server.default_greeting)
        .to_string();

    let twiml = match run_turn(&state, &utterance).await {
        Ok(turn_id) => VoiceResponse::new().play(playback_url(&state, turn_id)),
        Err(e) => {
            error!("Voice turn failed: {}", e);
            VoiceResponse::new().say(APOLOGY)
        }
    };

    (
        [(header::CONTENT_TYPE, TWIML_CONTENT_TYPE)],
        twiml.to_xml(),
    )
        .into_response()
}

/// Serve the audio of the most recent completed turn
pub async fn latest_audio(State(state): State<AppState>) -> Response {
    match state.store.latest_ready().await {
        Some(turn_id) => serve_turn_audio(&state, turn_id).await,
        None => audio_not_found(),
    }
}

/// Serve the audio of one turn
pub async fn turn_audio(
    State(state): State<AppState>,
    Path(turn_id): Path<Uuid>,
) -> Response {
    serve_turn_audio(&state, turn_id).await
}

async fn serve_turn_audio(state: &AppState, turn_id: Uuid) -> Response {
    let Some(path) = state.store.ready_wav(turn_id).await else {
        return audio_not_found();
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "audio/wav")], bytes).into_response(),
        Err(e) => {
            error!("Failed to read audio file {}: {}", path.display(), e);
            audio_not_found()
        }
    }
}

fn audio_not_found() -> Response {
    (StatusCode::NOT_FOUND, "Audio file not found.").into_response()
}

/// Outbound call trigger
pub async fn call_now(State(state): State<AppState>) -> Response {
    let voice_url = format!("{}/voice", state.config.server.base_url);

    match state
        .twilio
        .originate_call(
            &state.config.twilio.from_number,
            &state.config.twilio.to_number,
            &voice_url,
        )
        .await
    {
        Ok(sid) => (StatusCode::OK, format!("Call initiated. SID: {}", sid)).into_response(),
        Err(e) => {
            error!("Failed to start call: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Call failed: {}", e),
            )
                .into_response()
        }
    }
}
