//! HTTP API Server
//!
//! Starts and manages the axum-based HTTP server.

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use vx_core::{CompletionClient, Config};
use vx_telephony::TwilioClient;
use vx_voice::{AudioStore, Transcoder, TtsClient, TtsConfig};

use crate::routes::routes;

/// Shared application state
///
/// All external collaborators are constructed once and injected here; the
/// handlers hold no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub completion: Arc<CompletionClient>,
    pub tts: Arc<TtsClient>,
    pub twilio: Arc<TwilioClient>,
    pub store: Arc<AudioStore>,
    pub transcoder: Transcoder,
}

impl AppState {
    /// Build the full collaborator set from a loaded configuration
    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        let completion = CompletionClient::new(&config.llm)
            .map_err(|e| anyhow::anyhow!("Failed to create completion client: {}", e))?;

        let mut tts_config = TtsConfig::elevenlabs(&config.tts.api_key, &config.tts.voice_id)
            .with_model(&config.tts.model)
            .with_voice_settings(config.tts.stability, config.tts.similarity_boost)
            .with_timeout_secs(config.tts.timeout_secs);
        if let Some(url) = &config.tts.base_url {
            tts_config = tts_config.with_base_url(url);
        }
        let tts = TtsClient::new(tts_config)
            .map_err(|e| anyhow::anyhow!("Failed to create TTS client: {}", e))?;

        let mut twilio =
            TwilioClient::new(&config.twilio.account_sid, &config.twilio.auth_token);
        if let Some(url) = &config.twilio.base_url {
            twilio = twilio.with_base_url(url);
        }

        let store = AudioStore::new(&config.server.audio_dir)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create audio store: {}", e))?;

        let transcoder = Transcoder::new()
            .with_timeout(Duration::from_secs(config.server.transcode_timeout_secs));

        Ok(Self {
            config,
            completion: Arc::new(completion),
            tts: Arc::new(tts),
            twilio: Arc::new(twilio),
            store: Arc::new(store),
            transcoder,
        })
    }
}

/// Start the HTTP server
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let port = state.config.server.port;

    let app = Router::new()
        .merge(routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Voice gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
