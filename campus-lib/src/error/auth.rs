//! Authentication error types

/// Errors raised by a [`TokenProvider`](crate::auth::TokenProvider).
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The credential store could not be read or written.
    #[error("Credential storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// Creates a storage error from any displayable cause.
    pub fn storage(cause: impl std::fmt::Display) -> Self {
        Self::Storage(cause.to_string())
    }
}
