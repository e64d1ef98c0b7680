//! In-memory store backend.

use async_trait::async_trait;
use dashmap::DashMap;

use super::{StoreBackend, StoreError};

/// Backend that keeps everything in a `DashMap`. Used by tests and as the
/// fallback when no data directory exists.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: DashMap<String, Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).map(|v| v.clone()))
    }

    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.key().starts_with(prefix))
            .map(|e| e.key().clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}
