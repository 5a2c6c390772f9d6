//! Telephony audio transcoding
//!
//! Converts synthesized audio into the narrowband format telephony networks
//! expect: one channel, 8000 Hz, mu-law PCM in a WAV container. The work is
//! delegated to an external `ffmpeg` binary run as an async subprocess with a
//! bounded timeout; the process is killed if the caller drops the future.

use std::path::Path;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::error::{Result, VoiceError};

/// Target channel count for telephony playback
pub const TELEPHONY_CHANNELS: u32 = 1;
/// Target sample rate for telephony playback
pub const TELEPHONY_SAMPLE_RATE: u32 = 8000;
/// Target codec for telephony playback
pub const TELEPHONY_CODEC: &str = "pcm_mulaw";

/// ffmpeg-based transcoder
#[derive(Debug, Clone)]
pub struct Transcoder {
    command: String,
    timeout: Duration,
}

impl Default for Transcoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcoder {
    /// Create a transcoder using `ffmpeg` from PATH with a 30 second timeout
    pub fn new() -> Self {
        Self {
            command: "ffmpeg".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Use a different encoder binary
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Set the transcode timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the encoder argument list for one conversion
    fn build_args(input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-i".to_string(),
            input.display().to_string(),
            "-ac".to_string(),
            TELEPHONY_CHANNELS.to_string(),
            "-ar".to_string(),
            TELEPHONY_SAMPLE_RATE.to_string(),
            "-acodec".to_string(),
            TELEPHONY_CODEC.to_string(),
            "-f".to_string(),
            "wav".to_string(),
            output.display().to_string(),
        ]
    }

    /// Convert `input` into a telephony WAV at `output`
    ///
    /// Suspends until the encoder exits, fails, or the timeout elapses.
    pub async fn to_telephony_wav(&self, input: &Path, output: &Path) -> Result<()> {
        let args = Self::build_args(input, output);

        debug!(
            command = %self.command,
            input = %input.display(),
            output = %output.display(),
            "Starting transcode"
        );

        let child = Command::new(&self.command)
            .args(&args)
            .kill_on_drop(true)
            .output();

        let result = timeout(self.timeout, child).await;

        match result {
            Ok(Ok(out)) if out.status.success() => {
                info!("Audio converted to telephony WAV: {}", output.display());
                Ok(())
            }
            Ok(Ok(out)) => {
                let stderr = String::from_utf8_lossy(&out.stderr);
                warn!("Encoder exited with {}: {}", out.status, stderr);
                Err(VoiceError::TranscodeFailed(format!(
                    "{} exited with {}: {}",
                    self.command,
                    out.status,
                    stderr.trim()
                )))
            }
            Ok(Err(e)) => Err(VoiceError::TranscodeFailed(format!(
                "Failed to run {}: {}",
                self.command, e
            ))),
            Err(_) => {
                warn!("Transcode timed out after {:?}", self.timeout);
                Err(VoiceError::TranscodeTimeout(self.timeout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_build_args_telephony_parameters() {
        let args = Transcoder::build_args(
            &PathBuf::from("in/source.mp3"),
            &PathBuf::from("out/turn.wav"),
        );

        assert_eq!(
            args,
            vec![
                "-y",
                "-i",
                "in/source.mp3",
                "-ac",
                "1",
                "-ar",
                "8000",
                "-acodec",
                "pcm_mulaw",
                "-f",
                "wav",
                "out/turn.wav",
            ]
        );
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_transcode_with_stub_encoder() {
        let dir = tempfile::tempdir().unwrap();

        // Stub encoder: writes the last argument, like ffmpeg writes its output file
        let stub = write_script(
            dir.path(),
            "stub-encoder",
            "#!/bin/sh\nfor last; do :; done\necho RIFF > \"$last\"\n",
        );

        let input = dir.path().join("source.mp3");
        std::fs::write(&input, b"fake mp3").unwrap();
        let output = dir.path().join("turn.wav");

        let transcoder = Transcoder::new().with_command(stub.display().to_string());
        transcoder.to_telephony_wav(&input, &output).await.unwrap();

        assert!(output.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_encoder_is_transcode_error() {
        let dir = tempfile::tempdir().unwrap();
        let stub = write_script(
            dir.path(),
            "stub-encoder",
            "#!/bin/sh\necho 'no such codec' >&2\nexit 1\n",
        );

        let transcoder = Transcoder::new().with_command(stub.display().to_string());
        let err = transcoder
            .to_telephony_wav(&dir.path().join("in.mp3"), &dir.path().join("out.wav"))
            .await
            .unwrap_err();

        match err {
            VoiceError::TranscodeFailed(msg) => assert!(msg.contains("no such codec")),
            other => panic!("expected TranscodeFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_encoder_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let stub = write_script(dir.path(), "stub-encoder", "#!/bin/sh\nsleep 5\n");

        let transcoder = Transcoder::new()
            .with_command(stub.display().to_string())
            .with_timeout(Duration::from_millis(100));

        let err = transcoder
            .to_telephony_wav(&dir.path().join("in.mp3"), &dir.path().join("out.wav"))
            .await
            .unwrap_err();

        assert!(matches!(err, VoiceError::TranscodeTimeout(_)));
    }
}
