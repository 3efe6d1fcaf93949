//! Plain-text documents the user points the form at.

use std::path::Path;

use tolk_core::{Result, TolkError};

/// Reads a reference translation. The whole file is one reference.
pub async fn read_reference(path: &Path) -> Result<String> {
    read_text(path).await
}

/// Reads the prompting tips shown verbatim in the help dialog.
pub async fn read_tips(path: &Path) -> Result<String> {
    read_text(path).await
}

async fn read_text(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| TolkError::io(format!("{}: {}", path.display(), e)))
}
