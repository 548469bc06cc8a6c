//! Storage trait definition
//!
//! Abstract interface for reading and replacing one durable byte object

use async_trait::async_trait;
use std::sync::Arc;

/// Storage error
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage lock poisoned")]
    Lock,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Whole-object byte storage.
///
/// A backend holds at most one object. Reads return the full content and
/// writes replace it; there are no partial or appending writes.
#[async_trait]
pub trait ByteStorage: Send + Sync {
    /// Read the full content, `None` if the object does not exist yet
    async fn read(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the full content
    async fn write(&self, bytes: &[u8]) -> Result<()>;

    /// Location used in log output
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: ByteStorage + ?Sized> ByteStorage for Arc<T> {
    async fn read(&self) -> Result<Option<Vec<u8>>> {
        (**self).read().await
    }

    async fn write(&self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Shared storage reference
pub type SharedStorage = Arc<dyn ByteStorage>;
