//! Append-only transcript file.

use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tolk_core::Result;
use tolk_core::session::Turn;
use tolk_core::transcript::{TRANSCRIPT_HEADER, score_block, turn_block};

/// Writes one human-readable block per turn, flushing after every write.
#[derive(Debug, Clone)]
pub struct TranscriptLogger {
    path: PathBuf,
}

impl TranscriptLogger {
    /// Truncates the file at `path` and writes the header.
    ///
    /// Called once per process at start-up.
    pub async fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::write(&path, TRANSCRIPT_HEADER).await?;
        tracing::info!("[TranscriptLogger] Started transcript at {:?}", path);
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(&self, text: &str) -> Result<()> {
        let mut file = OpenOptions::new().append(true).create(true).open(&self.path).await?;
        file.write_all(text.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    pub async fn append_turn(&self, turn: &Turn) -> Result<()> {
        self.append(&turn_block(turn)).await
    }

    pub async fn append_score(&self, score: Option<f64>) -> Result<()> {
        self.append(&score_block(score)).await
    }

    pub async fn read_all(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.path).await?)
    }

    /// Writes a full copy of the transcript to `destination`.
    pub async fn export_to(&self, destination: &Path) -> Result<()> {
        let content = self.read_all().await?;
        fs::write(destination, content).await?;
        tracing::info!("[TranscriptLogger] Exported transcript to {:?}", destination);
        Ok(())
    }
}
