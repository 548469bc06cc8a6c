//! File storage implementation
//!
//! One file on disk, read and written whole through tokio::fs.

use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tracing::debug;

use crate::trait_::{ByteStorage, Result};

/// Atomic file write: writes to a uniquely named temporary file in the target's
/// directory, then renames it over the target path. The temporary file is
/// removed if any step fails.
pub async fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let path = path.to_path_buf();
    let content = content.to_vec();

    tokio::task::spawn_blocking(move || -> std::io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&content)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    })
    .await
    .map_err(std::io::Error::other)?
}

/// File-backed storage
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    atomic: bool,
}

impl FileStorage {
    /// Storage at `path` using atomic writes
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            atomic: true,
        }
    }

    /// Toggle the temp-file-and-rename write path
    pub fn with_atomic_write(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ByteStorage for FileStorage {
    async fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path).await {
            Ok(bytes) => {
                debug!(path = %self.path.display(), bytes = bytes.len(), "read backing file");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "backing file absent");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        if self.atomic {
            atomic_write(&self.path, bytes).await?;
        } else {
            fs::write(&self.path, bytes).await?;
        }

        debug!(path = %self.path.display(), bytes = bytes.len(), atomic = self.atomic, "wrote backing file");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
