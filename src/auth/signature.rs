//! HMAC-SHA256 signature generation for Pritunl API authentication.
//!
//! The server expects a signature computed as:
//! ```text
//! Base64(HMAC-SHA256(api_secret, token&timestamp&nonce&METHOD&path))
//! ```
//!
//! Query parameters and the request body are not part of the signed string.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::{AuthContext, Credentials};
use crate::error::PritunlError;

type HmacSha256 = Hmac<Sha256>;

/// Build the string that gets signed.
pub fn canonical_string(
    token: &str,
    timestamp: i64,
    nonce: &str,
    method: &str,
    path: &str,
) -> String {
    [token, &timestamp.to_string(), nonce, method, path].join("&")
}

/// Sign a request for the Pritunl API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the token and secret
/// * `context` - Timestamp and nonce for this request
/// * `method` - The HTTP method, upper case (e.g., "GET")
/// * `path` - The URL path without query string (e.g., "/organization")
///
/// # Returns
///
/// Base64-encoded HMAC-SHA256 signature for the `Auth-Signature` header.
///
/// # Example
///
/// ```rust
/// use pritunl_api_client::auth::{AuthContext, Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("vpn.example.com", "token", "secret");
/// let context = AuthContext::new(1700000000, "0123456789abcdef0123456789abcdef");
/// let signature = sign_request(&credentials, &context, "GET", "/organization")?;
/// assert_eq!(signature.len(), 44);
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    context: &AuthContext,
    method: &str,
    path: &str,
) -> Result<String, PritunlError> {
    let message = canonical_string(
        &credentials.token,
        context.timestamp,
        &context.nonce,
        method,
        path,
    );

    let mut hmac = HmacSha256::new_from_slice(credentials.expose_secret().as_bytes())
        .map_err(|e| PritunlError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(message.as_bytes());
    let hmac_result = hmac.finalize().into_bytes();

    Ok(BASE64.encode(hmac_result))
}
