//! Per-turn audio store
//!
//! Each webhook turn gets its own source/output pair under the audio
//! directory, keyed by a generated turn id. Concurrent turns therefore never
//! write to the same path. The store also remembers the most recent turn
//! whose WAV finished transcoding, for providers configured with a bare
//! playback URL.

use std::path::{Path, PathBuf};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;

/// Per-turn audio file store
#[derive(Debug)]
pub struct AudioStore {
    dir: PathBuf,
    latest_ready: RwLock<Option<Uuid>>,
}

impl AudioStore {
    /// Create a store rooted at `dir`, creating the directory if needed
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;

        Ok(Self {
            dir,
            latest_ready: RwLock::new(None),
        })
    }

    /// Allocate an id for a new turn
    pub fn new_turn(&self) -> Uuid {
        Uuid::new_v4()
    }

    /// Path of the synthesized source audio for a turn
    pub fn source_path(&self, turn_id: Uuid) -> PathBuf {
        self.dir.join(format!("{}.mp3", turn_id))
    }

    /// Path of the transcoded telephony WAV for a turn
    pub fn wav_path(&self, turn_id: Uuid) -> PathBuf {
        self.dir.join(format!("{}.wav", turn_id))
    }

    /// Store root
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write synthesized bytes for a turn, returning the source path
    pub async fn write_source(&self, turn_id: Uuid, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.source_path(turn_id);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    /// Record that a turn's WAV is ready to serve
    pub async fn mark_ready(&self, turn_id: Uuid) {
        *self.latest_ready.write().await = Some(turn_id);
    }

    /// The most recently completed turn, if any
    pub async fn latest_ready(&self) -> Option<Uuid> {
        *self.latest_ready.read().await
    }

    /// WAV path for a turn, only if the file exists on disk
    pub async fn ready_wav(&self, turn_id: Uuid) -> Option<PathBuf> {
        let path = self.wav_path(turn_id);
        match tokio::fs::try_exists(&path).await {
            Ok(true) => Some(path),
            _ => None,
        }
    }

    /// Remove a turn's files, ignoring ones that were never written
    pub async fn discard(&self, turn_id: Uuid) {
        let _ = tokio::fs::remove_file(self.source_path(turn_id)).await;
        let _ = tokio::fs::remove_file(self.wav_path(turn_id)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_paths_are_per_turn() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path()).await.unwrap();

        let a = store.new_turn();
        let b = store.new_turn();

        assert_ne!(store.source_path(a), store.source_path(b));
        assert_ne!(store.wav_path(a), store.wav_path(b));
        assert!(store.wav_path(a).to_string_lossy().ends_with(".wav"));
    }

    #[tokio::test]
    async fn test_write_source_persists_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path()).await.unwrap();

        let turn = store.new_turn();
        let path = store.write_source(turn, b"fake mp3").await.unwrap();

        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"fake mp3");
    }

    #[tokio::test]
    async fn test_latest_ready_tracking() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path()).await.unwrap();

        assert_eq!(store.latest_ready().await, None);

        let turn = store.new_turn();
        store.mark_ready(turn).await;
        assert_eq!(store.latest_ready().await, Some(turn));
    }

    #[tokio::test]
    async fn test_ready_wav_requires_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path()).await.unwrap();

        let turn = store.new_turn();
        assert!(store.ready_wav(turn).await.is_none());

        tokio::fs::write(store.wav_path(turn), b"RIFF").await.unwrap();
        assert_eq!(store.ready_wav(turn).await, Some(store.wav_path(turn)));
    }

    #[tokio::test]
    async fn test_discard_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path()).await.unwrap();

        let turn = store.new_turn();
        store.write_source(turn, b"x").await.unwrap();
        tokio::fs::write(store.wav_path(turn), b"y").await.unwrap();

        store.discard(turn).await;
        assert!(store.ready_wav(turn).await.is_none());
        assert!(!store.source_path(turn).exists());
    }
}
