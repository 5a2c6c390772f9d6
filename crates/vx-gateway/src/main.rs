//! vx-gateway: Voice Gateway Main Binary
//!
//! Main entry point for the voice gateway.
//!
//! Usage:
//!   vx-gateway           - Start the webhook server
//!   vx-gateway --help    - Show help

use vx_api::AppState;
use vx_core::Config;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--version" | "-v" => {
                println!("vx-gateway {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            _ => {}
        }
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting voice gateway...");
    tracing::info!("Model: {}", config.llm.model);
    tracing::info!("Base URL: {}", config.server.base_url);

    let state = AppState::from_config(config).await?;

    tokio::select! {
        result = vx_api::start_server(state) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down...");
        }
    }

    Ok(())
}

/// Print help message
fn print_help() {
    println!("vx-gateway - Voice Gateway");
    println!();
    println!("Usage:");
    println!("  vx-gateway           Start the webhook server");
    println!("  vx-gateway --help    Show this help message");
    println!("  vx-gateway --version Show version");
    println!();
    println!("Environment Variables:");
    println!("  OPENAI_API_KEY       Completion API key (required)");
    println!("  LLM_MODEL            Completion model (default: gpt-4)");
    println!("  ELEVENLABS_API_KEY   Speech synthesis API key (required)");
    println!("  ELEVENLABS_VOICE_ID  Speech synthesis voice (required)");
    println!("  TWILIO_ACCOUNT_SID   Twilio account SID (required)");
    println!("  TWILIO_AUTH_TOKEN    Twilio auth token (required)");
    println!("  TWILIO_PHONE_NUMBER  Caller ID for outbound calls");
    println!("  MY_PHONE_NUMBER      Destination for the call trigger");
    println!("  BASE_URL             Externally reachable base URL");
    println!("  PORT                 Listen port (default: 3000)");
    println!("  AUDIO_DIR            Per-turn audio directory (default: data/audio)");
}
