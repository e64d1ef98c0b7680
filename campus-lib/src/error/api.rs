//! API error types

use std::time::Duration;

/// HTTP status the API uses for a missing or expired session.
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// Errors that can occur during API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message (server-supplied when the body carried one).
        message: String,
        /// Whether `message` came from the body's `error`/`message` field.
        from_server: bool,
    },

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates an HTTP error from a status and raw response body.
    ///
    /// A JSON body of the form `{"error": "..."}` or `{"message": "..."}`
    /// contributes its message; any other body is kept verbatim.
    pub fn from_body(status: u16, body: &str) -> Self {
        match server_message(body) {
            Some(message) => Self::Http {
                status,
                message,
                from_server: true,
            },
            None => Self::Http {
                status,
                message: body.trim().to_string(),
                from_server: false,
            },
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the server rejected the request's credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(STATUS_UNAUTHORIZED)
    }

    /// Returns the message supplied by the server, if the body had one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http {
                message,
                from_server: true,
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }
}

fn server_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| json.get(key).and_then(|v| v.as_str()))
        .filter(|msg| !msg.trim().is_empty())
        .map(str::to_string)
}
