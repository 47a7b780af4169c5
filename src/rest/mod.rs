//! Pritunl REST API client.
//!
//! [`PritunlClient::execute`] is the signed-request primitive: every other
//! method is built on it.
//!
//! ```rust,ignore
//! use pritunl_api_client::rest::{PritunlClient, Request};
//!
//! let users = client
//!     .execute_json::<serde_json::Value>(Request::get("/key/users").query("org", org_id))
//!     .await?;
//! if users.response.is_not_found() {
//!     // organization is gone
//! }
//! ```

mod client;
pub mod endpoints;
mod request;
pub mod resources;
mod response;

pub use client::{DEFAULT_TIMEOUT, INSECURE_ENV, PritunlClient, PritunlClientBuilder};
pub use request::Request;
pub use response::{Decoded, Response};
