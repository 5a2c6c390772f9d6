//! vx-voice: Speech synthesis and telephony audio for the voice gateway
//!
//! ## Features
//!
//! - **Text-to-Speech**: ElevenLabs API (primary) and OpenAI-compatible TTS
//! - **Transcoding**: ffmpeg invocation producing the 8 kHz mono mu-law WAV
//!   required on telephony networks, with a bounded timeout
//! - **Audio store**: per-turn output files keyed by a generated turn id
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vx_voice::{TtsClient, TtsConfig, Transcoder, AudioStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TtsConfig::elevenlabs("your-api-key", "voice-id");
//!     let tts = TtsClient::new(config)?;
//!     let store = AudioStore::new("data/audio").await?;
//!
//!     let turn = store.new_turn();
//!     let synthesized = tts.synthesize("Hello, world!").await?;
//!     let source = store.write_source(turn, &synthesized.audio_data).await?;
//!
//!     Transcoder::new()
//!         .to_telephony_wav(&source, &store.wav_path(turn))
//!         .await?;
//!     store.mark_ready(turn).await;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod store;
pub mod transcode;
pub mod tts;

pub use error::{Result, VoiceError};
pub use store::AudioStore;
pub use transcode::Transcoder;
pub use tts::{SynthesisResult, TtsClient, TtsConfig, TtsProvider};
