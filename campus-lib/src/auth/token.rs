//! TokenProvider trait and the in-memory provider

use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::AuthError;

/// Source of the bearer token attached to API requests.
///
/// Implementations decide where the token lives (memory, a settings
/// database, ...). The client calls [`invalidate`](TokenProvider::invalidate)
/// when the API answers 401, so the stored credential is dropped before the
/// error reaches the caller.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns the stored token, or `None` when signed out.
    async fn token(&self) -> Result<Option<String>, AuthError>;

    /// Discards the stored token.
    async fn invalidate(&self) -> Result<(), AuthError>;
}

/// A token provider backed by memory.
///
/// Useful for scripts and tests. Invalidation clears the token for the
/// lifetime of the provider.
///
/// # Example
///
/// ```
/// use campus_lib::auth::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("eyJhbGciOi...");
/// ```
#[derive(Debug, Default)]
pub struct StaticTokenProvider {
    token: RwLock<Option<String>>,
}

impl StaticTokenProvider {
    /// Creates a provider holding the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    /// Creates a provider with no token.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self) -> Result<Option<String>, AuthError> {
        self.token
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| AuthError::Storage("token lock poisoned".into()))
    }

    async fn invalidate(&self) -> Result<(), AuthError> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| AuthError::Storage("token lock poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalidate_clears_token() {
        let provider = StaticTokenProvider::new("abc");
        assert_eq!(provider.token().await.unwrap().as_deref(), Some("abc"));

        provider.invalidate().await.unwrap();
        assert_eq!(provider.token().await.unwrap(), None);
    }
}
