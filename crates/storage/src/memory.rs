//! In-memory storage implementation
//!
//! Holds the object in process memory; nothing survives the process

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::trait_::{ByteStorage, Result, SharedStorage, StorageError};

/// In-memory storage implementation
#[derive(Debug, Default)]
pub struct MemoryStorage {
    content: Mutex<Option<Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing content, as if a file were already present
    pub fn with_content(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            content: Mutex::new(Some(bytes.into())),
        }
    }
}

#[async_trait]
impl ByteStorage for MemoryStorage {
    async fn read(&self) -> Result<Option<Vec<u8>>> {
        let content = self.content.lock().map_err(|_| StorageError::Lock)?;
        Ok(content.clone())
    }

    async fn write(&self, bytes: &[u8]) -> Result<()> {
        let mut content = self.content.lock().map_err(|_| StorageError::Lock)?;
        *content = Some(bytes.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Create a new shared in-memory storage
pub fn create_memory_storage() -> SharedStorage {
    Arc::new(MemoryStorage::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_reads_none() {
        let storage = MemoryStorage::new();
        assert!(storage.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_replaces_content() {
        let storage = MemoryStorage::with_content("old");
        storage.write(b"new").await.unwrap();
        assert_eq!(storage.read().await.unwrap().as_deref(), Some(&b"new"[..]));
    }

    #[tokio::test]
    async fn test_shared_storage() {
        let storage = create_memory_storage();
        storage.write(b"[]").await.unwrap();
        assert_eq!(storage.read().await.unwrap(), Some(b"[]".to_vec()));
        assert_eq!(storage.describe(), "memory");
    }
}
