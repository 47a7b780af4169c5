//! Nonce and timestamp generation for Pritunl API authentication.
//!
//! Pritunl rejects requests whose timestamp is too far from server time and
//! requests that reuse a nonce, so both are generated fresh for each request.

use time::OffsetDateTime;
use uuid::Uuid;

/// Trait for providing nonces for authenticated requests.
///
/// Every call must return a value not returned before.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    fn next_nonce(&self) -> String;
}

/// A nonce provider backed by random (v4) UUIDs.
///
/// Nonces are rendered as 32 lowercase hex characters without hyphens.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNonce;

impl RandomNonce {
    /// Create a new random nonce provider.
    pub fn new() -> Self {
        Self
    }
}

impl NonceProvider for RandomNonce {
    fn next_nonce(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Per-request authentication inputs: the send timestamp and the nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Unix timestamp in seconds.
    pub timestamp: i64,
    /// One-time identifier.
    pub nonce: String,
}

impl AuthContext {
    /// Create a context from explicit values.
    pub fn new(timestamp: i64, nonce: impl Into<String>) -> Self {
        Self {
            timestamp,
            nonce: nonce.into(),
        }
    }

    /// Create a context stamped with the current time and a fresh nonce.
    pub fn generate(nonce_provider: &dyn NonceProvider) -> Self {
        Self {
            timestamp: OffsetDateTime::now_utc().unix_timestamp(),
            nonce: nonce_provider.next_nonce(),
        }
    }
}
