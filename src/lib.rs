//! # Pritunl API Client
//!
//! An async Rust client library for the Pritunl VPN server HTTP API.
//!
//! ## Features
//!
//! - HMAC-SHA256 request signing (`Auth-Token`, `Auth-Timestamp`, `Auth-Nonce`, `Auth-Signature`)
//! - Explicit per-client HTTP configuration with certificate verification on by default
//! - Typed helpers for organizations, users and servers
//! - 401 and 404 surfaced as responses, not errors, on the raw request path
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pritunl_api_client::auth::StaticCredentials;
//! use pritunl_api_client::rest::PritunlClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Arc::new(StaticCredentials::new("vpn.example.com", "token", "secret"));
//!     let client = PritunlClient::builder().credentials(credentials).build()?;
//!     for org in client.list_organizations().await? {
//!         println!("{}: {}", org.id, org.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;

// Re-export commonly used types at crate root
pub use error::{ErrorKind, PritunlError};
pub use rest::{PritunlClient, Request, Response};

/// Result type alias using PritunlError
pub type Result<T> = std::result::Result<T, PritunlError>;
