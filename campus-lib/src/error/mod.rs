//! Error types

mod api;
mod auth;

pub use api::*;
pub use auth::*;

/// Top-level error returned by client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The token provider failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl Error {
    /// Returns `true` if the API rejected the stored credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(api) if api.is_unauthorized())
    }

    /// Returns the message the server supplied with an HTTP error, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api(api) => api.server_message(),
            _ => None,
        }
    }
}
