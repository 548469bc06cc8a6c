//! 存储错误
//!
//! Every store operation reports failure through `StoreError`.

use catalog_core::{ProductId, ValidationError};
use catalog_storage::StorageError;

/// 存储错误
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Product code already exists: {0}")]
    DuplicateCode(String),

    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error("No product id left after {0}")]
    IdExhausted(ProductId),

    #[error("Field `{0}` cannot be modified")]
    ImmutableField(&'static str),

    #[error("Backing file is not a valid product list: {0}")]
    Deserialization(#[source] serde_json::Error),

    #[error("Failed to serialize products: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
