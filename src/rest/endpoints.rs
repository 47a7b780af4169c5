//! Pritunl REST API paths and header names.
//!
//! IDs are percent-encoded as single path segments.

use url::form_urlencoded;

/// Authentication header names.
pub mod headers {
    /// API token.
    pub const AUTH_TOKEN: &str = "Auth-Token";
    /// Unix timestamp in seconds.
    pub const AUTH_TIMESTAMP: &str = "Auth-Timestamp";
    /// Per-request nonce.
    pub const AUTH_NONCE: &str = "Auth-Nonce";
    /// Base64 HMAC-SHA256 signature.
    pub const AUTH_SIGNATURE: &str = "Auth-Signature";
}

/// Organizations collection.
pub const ORGANIZATIONS: &str = "/organization";
/// Servers collection.
pub const SERVERS: &str = "/server";

/// Encode an ID so it stays one path segment.
fn segment(id: &str) -> String {
    // byte_serialize writes a space as '+'; a literal '+' comes out as %2B.
    form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// `/organization/{id}`
pub fn organization(id: &str) -> String {
    format!("{ORGANIZATIONS}/{}", segment(id))
}

/// `/user/{organization}`
pub fn users(organization_id: &str) -> String {
    format!("/user/{}", segment(organization_id))
}

/// `/user/{organization}/{id}`
pub fn user(organization_id: &str, user_id: &str) -> String {
    format!("/user/{}/{}", segment(organization_id), segment(user_id))
}

/// `/server/{id}`
pub fn server(id: &str) -> String {
    format!("{SERVERS}/{}", segment(id))
}

/// `/server/{id}/organization/{organization}`
pub fn server_organization(server_id: &str, organization_id: &str) -> String {
    format!(
        "{SERVERS}/{}/organization/{}",
        segment(server_id),
        segment(organization_id)
    )
}

/// `/server/{id}/operation/{operation}`
pub fn server_operation(server_id: &str, operation: &str) -> String {
    format!("{SERVERS}/{}/operation/{operation}", segment(server_id))
}
