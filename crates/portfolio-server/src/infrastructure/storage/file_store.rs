//! JSON file persistence.
//!
//! The document lives in a single file (by default `portfolio-data.json` in
//! the working directory), pretty-printed with two-space indentation so it
//! stays readable and diffable by hand.
//!
//! # Atomic replacement
//!
//! A save never writes the target file in place.  The new content goes to a
//! uniquely named sibling file, which is flushed to disk and then renamed
//! over the target.  Readers therefore see either the old document or the
//! new one, never a truncated mix, even if the process dies mid-write.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use uuid::Uuid;

use super::{default_document, ConfigStore, StoreError};

/// Stores the portfolio document in one JSON file.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file the document is stored in.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A fresh temporary file next to the target, so the final rename stays
    /// on one file system.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "portfolio-data.json".to_string());
        self.path
            .with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4().simple()))
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn load(&self) -> Result<Value, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored document; serving default");
                default_document()
            }
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    async fn save(&self, document: &Value) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(document).map_err(StoreError::Encode)?;

        // `Path::parent` is `Some("")` for a bare file name.
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| StoreError::Write {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        replace_file(&self.path, &self.temp_path(), content.as_bytes()).await?;

        info!(path = %self.path.display(), bytes = content.len(), "portfolio document saved");
        Ok(())
    }
}

/// Writes `bytes` to `temp`, flushes it, and renames it over `target`.  On
/// any failure the temp file is removed and `target` is left untouched.
async fn replace_file(target: &Path, temp: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Err(source) = write_synced(temp, bytes).await {
        tokio::fs::remove_file(temp).await.ok();
        return Err(StoreError::Write {
            path: temp.to_path_buf(),
            source,
        });
    }

    if let Err(source) = tokio::fs::rename(temp, target).await {
        tokio::fs::remove_file(temp).await.ok();
        return Err(StoreError::Write {
            path: target.to_path_buf(),
            source,
        });
    }
    Ok(())
}

async fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

// ── Tests ─────────────────────────────────────────────────────────────────────
