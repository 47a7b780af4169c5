//! Error types for the Pritunl client library.

use reqwest::StatusCode;
use thiserror::Error;

/// The main error type for all Pritunl client operations.
#[derive(Error, Debug)]
pub enum PritunlError {
    /// The request payload could not be encoded as JSON
    #[error("request: JSON marshal error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Transport-level failure (DNS, connection refused, TLS, timeout)
    #[error("request: request error: {0}")]
    Request(#[from] reqwest_middleware::Error),

    /// The server answered with a status outside 2xx other than 401/404
    #[error("request: bad response status {status}")]
    Status {
        /// The HTTP status code returned by the server
        status: StatusCode,
        /// Response body, as far as it could be read
        body: String,
    },

    /// The response body could not be read
    #[error("request: failed to read response body: {0}")]
    Read(#[source] reqwest::Error),

    /// The response body could not be decoded into the expected structure
    #[error("request: failed to parse response: {0}")]
    Parse(#[source] serde_json::Error),

    /// The request could not be built (bad path, method or header value)
    #[error("request: invalid request: {0}")]
    InvalidRequest(String),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Signing failed
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The underlying HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// A required credential was not configured
    #[error("Missing credentials: {0} not set")]
    MissingCredentials(String),

    /// The server rejected the credentials (typed resource helpers only)
    #[error("Unauthorized: the Pritunl server rejected the API credentials")]
    Unauthorized,
}

/// Coarse classification of a [`PritunlError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The payload could not be serialized.
    Serialization,
    /// The request failed in transport or returned an error status.
    Request,
    /// The response could not be decoded.
    Parse,
    /// The client or request was misconfigured before anything was sent.
    Config,
}

impl PritunlError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::Request(_) | Self::Status { .. } | Self::Read(_) | Self::Unauthorized => {
                ErrorKind::Request
            }
            Self::Parse(_) => ErrorKind::Parse,
            Self::InvalidRequest(_)
            | Self::Url(_)
            | Self::Auth(_)
            | Self::Build(_)
            | Self::MissingCredentials(_) => ErrorKind::Config,
        }
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            Self::Request(e) => e.status(),
            Self::Read(e) => e.status(),
            _ => None,
        }
    }

    /// Check if the request timed out.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Request(reqwest_middleware::Error::Reqwest(e)) => e.is_timeout(),
            Self::Read(e) => e.is_timeout(),
            _ => false,
        }
    }
}
