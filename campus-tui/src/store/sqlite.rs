//! SQLite store backend with an in-memory read cache.

use std::path::Path;

use async_sqlite::Client;
use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;

use super::{StoreBackend, StoreError};

pub struct SqliteBackend {
    client: Client,
    cache: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    /// Open (or create) the database at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        debug!("Opening settings database at {}", path.display());
        let client = async_sqlite::ClientBuilder::new().path(path).open().await?;

        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS settings (
                        key TEXT PRIMARY KEY,
                        value BLOB NOT NULL
                    )",
                    [],
                )
            })
            .await?;

        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }
}

#[async_trait]
impl StoreBackend for SqliteBackend {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some(value) = self.cache.get(key) {
            return Ok(Some(value.clone()));
        }

        let key_owned = key.to_string();
        let result = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?")?;
                let mut rows = stmt.query([&key_owned])?;
                match rows.next()? {
                    Some(row) => Ok(Some(row.get::<_, Vec<u8>>(0)?)),
                    None => Ok(None),
                }
            })
            .await?;

        if let Some(ref value) = result {
            self.cache.insert(key.to_string(), value.clone());
        }
        Ok(result)
    }

    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let key_owned = key.to_string();
        let stored = value.clone();

        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO settings (key, value) VALUES (?, ?)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    rusqlite::params![&key_owned, &stored],
                )
            })
            .await?;

        self.cache.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let key_owned = key.to_string();
        self.client
            .conn(move |conn| conn.execute("DELETE FROM settings WHERE key = ?", [&key_owned]))
            .await?;

        self.cache.remove(key);
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let pattern = format!("{prefix}%");
        self.client
            .conn(move |conn| {
                let mut stmt =
                    conn.prepare("SELECT key FROM settings WHERE key LIKE ? ORDER BY key")?;
                let rows = stmt.query_map([&pattern], |row| row.get(0))?;
                rows.collect::<Result<Vec<_>, _>>()
            })
            .await
            .map_err(StoreError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let path = std::env::temp_dir().join(format!("campus-store-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let backend = SqliteBackend::open(&path).await.unwrap();
        backend.set_bytes("table.page_size.students", vec![20]).await.unwrap();
        backend.set_bytes("table.page_size.students", vec![50]).await.unwrap();
        backend.set_bytes("auth.token", vec![1, 2]).await.unwrap();
        drop(backend);

        let backend = SqliteBackend::open(&path).await.unwrap();
        assert_eq!(
            backend.get_bytes("table.page_size.students").await.unwrap(),
            Some(vec![50])
        );
        assert_eq!(
            backend.keys_with_prefix("table.").await.unwrap(),
            vec!["table.page_size.students".to_string()]
        );

        backend.delete("auth.token").await.unwrap();
        assert_eq!(backend.get_bytes("auth.token").await.unwrap(), None);
        let _ = std::fs::remove_file(&path);
    }
}
