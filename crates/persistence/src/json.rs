//! JSON 文件存储实现
//!
//! The whole product collection lives in one JSON array. Every call reads the
//! full array, and every mutation writes the full array back.

use catalog_core::{NewProduct, Product, ProductId, ProductPatch, StoreConfig};
use catalog_storage::{ByteStorage, FileStorage, MemoryStorage, SharedStorage};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::store::{Result, StoreError};

/// Product record store over a single byte object
#[derive(Debug)]
pub struct ProductStore<S: ByteStorage = SharedStorage> {
    storage: S,
    pretty: bool,
}

impl<S: ByteStorage> ProductStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            pretty: false,
        }
    }

    /// Pretty-print the array on write
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the full collection. An absent backing object is an empty collection.
    pub async fn list(&self) -> Result<Vec<Product>> {
        let Some(bytes) = self.storage.read().await? else {
            return Ok(Vec::new());
        };

        let products: Vec<Product> = serde_json::from_slice(&bytes).map_err(|e| {
            warn!("Failed to parse {}: {}", self.storage.describe(), e);
            StoreError::Deserialization(e)
        })?;

        debug!(location = %self.storage.describe(), count = products.len(), "loaded products");
        Ok(products)
    }

    /// Validate and append a new product, assigning it a fresh id.
    pub async fn create(&self, input: NewProduct) -> Result<Product> {
        let mut products = self.list().await?;

        if let Err(e) = input.validate() {
            warn!("Rejected product: {}", e);
            return Err(e.into());
        }

        let code = input.trimmed_code();
        if products.iter().any(|p| p.code == code) {
            warn!(code, "Rejected product: code already exists");
            return Err(StoreError::DuplicateCode(code.to_string()));
        }

        let id = next_id(&products)?;
        let product = input.into_product(id);
        products.push(product.clone());
        self.save(&products).await?;

        info!(id = %product.id, code = %product.code, "created product");
        Ok(product)
    }

    pub async fn get_by_id(&self, id: ProductId) -> Result<Product> {
        self.list()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Overlay `patch` onto the product with `id` and persist the result.
    pub async fn update_by_id(&self, id: ProductId, patch: ProductPatch) -> Result<Product> {
        let mut products = self.list().await?;

        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;

        if patch.changes_id(id) {
            warn!(%id, "Rejected update: id is immutable");
            return Err(StoreError::ImmutableField("id"));
        }

        patch.validate()?;

        if let Some(code) = patch.trimmed_code() {
            if products.iter().any(|p| p.id != id && p.code == code) {
                warn!(%id, code, "Rejected update: code already exists");
                return Err(StoreError::DuplicateCode(code.to_string()));
            }
        }

        patch.apply(&mut products[index]);
        let updated = products[index].clone();
        self.save(&products).await?;

        info!(%id, "updated product");
        Ok(updated)
    }

    /// Remove the product with `id`. The collection is rewritten even when
    /// nothing matched, so deleting from an absent backing file creates `[]`.
    pub async fn delete_by_id(&self, id: ProductId) -> Result<()> {
        let products = self.list().await?;
        let before = products.len();

        let remaining: Vec<Product> = products.into_iter().filter(|p| p.id != id).collect();
        self.save(&remaining).await?;

        info!(%id, removed = before - remaining.len(), "deleted product");
        Ok(())
    }

    async fn save(&self, products: &[Product]) -> Result<()> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(products)
        } else {
            serde_json::to_vec(products)
        }
        .map_err(StoreError::Serialization)?;

        self.storage.write(&bytes).await?;
        Ok(())
    }
}

fn next_id(products: &[Product]) -> Result<ProductId> {
    match products.iter().map(|p| p.id).max() {
        None => Ok(ProductId::FIRST),
        Some(max) => max.checked_next().ok_or(StoreError::IdExhausted(max)),
    }
}

impl ProductStore<FileStorage> {
    /// File-backed store configured from `config`
    pub fn open(config: &StoreConfig) -> Self {
        let storage = FileStorage::new(&config.path).with_atomic_write(config.atomic_write);
        Self::new(storage).with_pretty(config.pretty)
    }
}

impl ProductStore<MemoryStorage> {
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }
}

/// 创建 JSON 文件存储的便捷函数
pub fn open_json_store(path: impl Into<PathBuf>) -> ProductStore<FileStorage> {
    ProductStore::open(&StoreConfig::with_path(path))
}
