//! Store backend trait.

use async_trait::async_trait;

use super::StoreError;

/// Raw byte storage behind a [`Store`](super::Store).
#[async_trait]
pub trait StoreBackend: Send + Sync {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Insert or replace.
    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}
