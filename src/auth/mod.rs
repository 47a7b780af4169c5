//! Authentication module for the Pritunl API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Timestamp and nonce generation for replay attack prevention
//! - HMAC-SHA256 signature generation for authenticated requests

mod credentials;
mod nonce;
mod signature;

pub use credentials::{
    Credentials, CredentialsProvider, EnvCredentials, HOST_ENV, SECRET_ENV, StaticCredentials,
    TOKEN_ENV,
};
pub use nonce::{AuthContext, NonceProvider, RandomNonce};
pub use signature::{canonical_string, sign_request};
