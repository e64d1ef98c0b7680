//! Sign-in token backed by the store.

use async_trait::async_trait;
use campus_lib::auth::TokenProvider;
use campus_lib::error::AuthError;
use log::info;

use crate::store::{Store, StoreError, keys};

/// Token provider that reads the bearer token from the store.
///
/// There is no credential exchange: signing in stores a pasted token,
/// signing out (or a 401 from the API) deletes it.
#[derive(Clone)]
pub struct StoredTokenProvider {
    store: Store,
}

impl StoredTokenProvider {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Store a token. Blank tokens are refused and return `false`.
    pub async fn sign_in(&self, token: &str) -> Result<bool, StoreError> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(false);
        }
        self.store.set(keys::AUTH_TOKEN, &token.to_string()).await?;
        info!("Signed in");
        Ok(true)
    }

    pub async fn sign_out(&self) -> Result<(), StoreError> {
        self.store.delete(keys::AUTH_TOKEN).await?;
        info!("Signed out");
        Ok(())
    }

    /// Signed in iff a non-empty token is stored.
    pub async fn is_authenticated(&self) -> Result<bool, StoreError> {
        Ok(self.stored_token().await?.is_some())
    }

    async fn stored_token(&self) -> Result<Option<String>, StoreError> {
        let token: Option<String> = self.store.get(keys::AUTH_TOKEN).await?;
        Ok(token.filter(|t| !t.is_empty()))
    }
}

#[async_trait]
impl TokenProvider for StoredTokenProvider {
    async fn token(&self) -> Result<Option<String>, AuthError> {
        self.stored_token().await.map_err(AuthError::storage)
    }

    async fn invalidate(&self) -> Result<(), AuthError> {
        info!("Stored token rejected by the API, clearing it");
        self.store
            .delete(keys::AUTH_TOKEN)
            .await
            .map_err(AuthError::storage)
    }
}
