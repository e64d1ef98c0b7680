//! Main CampusClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::auth::TokenProvider;
use crate::error::ApiError;

/// The main client for interacting with the campus administration API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks safely.
///
/// # Example
///
/// ```ignore
/// use campus_lib::{CampusClient, auth::StaticTokenProvider};
/// use campus_lib::api::{Query, Resource};
///
/// let client = CampusClient::builder()
///     .url("http://localhost:5000")
///     .token_provider(StaticTokenProvider::new("my-token"))
///     .build()?;
///
/// let students = client.list(&Resource::students(), &Query::new()).await?;
/// ```
#[derive(Clone)]
pub struct CampusClient {
    pub(crate) inner: Arc<CampusClientInner>,
}

pub(crate) struct CampusClientInner {
    pub(crate) base_url: Url,
    pub(crate) token_provider: Arc<dyn TokenProvider>,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
}

impl CampusClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> CampusClientBuilder<Missing, Missing> {
        CampusClientBuilder::new()
    }

    /// Returns the base URL of the API.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Returns the token provider used by this client.
    pub fn token_provider(&self) -> &Arc<dyn TokenProvider> {
        &self.inner.token_provider
    }

    /// Resolves an absolute API path against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`CampusClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The API base URL
/// - `token_provider` - A [`TokenProvider`] implementation
pub struct CampusClientBuilder<U, P> {
    url: U,
    token_provider: P,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl CampusClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for CampusClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> CampusClientBuilder<Missing, P> {
    /// Sets the API base URL.
    ///
    /// # Example
    ///
    /// ```ignore
    /// .url("http://localhost:5000")
    /// ```
    pub fn url(self, url: impl Into<String>) -> CampusClientBuilder<Set<String>, P> {
        CampusClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> CampusClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> CampusClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        self.shared_token_provider(Arc::new(provider))
    }

    /// Sets a token provider that is also held elsewhere.
    pub fn shared_token_provider(
        self,
        provider: Arc<dyn TokenProvider>,
    ) -> CampusClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        CampusClientBuilder {
            url: self.url,
            token_provider: Set(provider),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> CampusClientBuilder<U, P> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl CampusClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`CampusClient`].
    ///
    /// Fails when the URL does not parse or the HTTP client cannot be built.
    pub fn build(self) -> Result<CampusClient, ApiError> {
        let base_url = Url::parse(&self.url.0)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.url.0, e)))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(CampusClient {
            inner: Arc::new(CampusClientInner {
                base_url,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
