//! Persistent key/value store for settings and the sign-in token.

mod backend;
pub mod keys;
mod memory;
mod sqlite;

pub use backend::StoreBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
}

/// Typed store.
///
/// Wraps a [`StoreBackend`] with bincode encoding. Cheap to clone; clones
/// share the backend.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn StoreBackend>,
}

impl Store {
    pub fn new(backend: impl StoreBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// In-memory store, nothing survives the process.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.backend.get_bytes(key).await? {
            Some(bytes) => Ok(Some(
                bincode::deserialize(&bytes).map_err(StoreError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    pub async fn get_or<T: DeserializeOwned>(
        &self,
        key: &str,
        default: T,
    ) -> Result<T, StoreError> {
        Ok(self.get(key).await?.unwrap_or(default))
    }

    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = bincode::serialize(value).map_err(StoreError::Serialization)?;
        self.backend.set_bytes(key, bytes).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.backend.delete(key).await
    }

    pub async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        self.backend.keys_with_prefix(prefix).await
    }

    /// Saved page size of a resource's table.
    pub async fn page_size(&self, resource: &str) -> Result<Option<usize>, StoreError> {
        let size: Option<u64> = self.get(&keys::page_size(resource)).await?;
        Ok(size.and_then(|s| usize::try_from(s).ok()))
    }

    pub async fn set_page_size(&self, resource: &str, size: usize) -> Result<(), StoreError> {
        self.set(&keys::page_size(resource), &(size as u64)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_typed_round_trip() {
        let store = Store::in_memory();
        store.set(keys::API_BASE_URL, &"http://api.test".to_string()).await.unwrap();
        let url: Option<String> = store.get(keys::API_BASE_URL).await.unwrap();
        assert_eq!(url.as_deref(), Some("http://api.test"));
    }

    #[tokio::test]
    async fn test_get_or_default() {
        let store = Store::in_memory();
        let timeout = store.get_or(keys::API_TIMEOUT_SECS, 30u64).await.unwrap();
        assert_eq!(timeout, 30);
    }

    #[tokio::test]
    async fn test_wrong_type_is_deserialization_error() {
        let store = Store::in_memory();
        store.set("k", &1u8).await.unwrap();
        let result: Result<Option<String>, _> = store.get("k").await;
        assert!(matches!(result, Err(StoreError::Deserialization(_))));
    }

    #[tokio::test]
    async fn test_page_size_per_resource() {
        let store = Store::in_memory();
        store.set_page_size("students", 50).await.unwrap();
        assert_eq!(store.page_size("students").await.unwrap(), Some(50));
        assert_eq!(store.page_size("teachers").await.unwrap(), None);
    }
}
