//! Types for the organization, user and server endpoints.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A Pritunl organization.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Organization {
    /// Organization ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Number of users.
    #[serde(default)]
    pub user_count: Option<u64>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Request body for creating or renaming an organization.
#[derive(Debug, Clone, Serialize)]
pub struct OrganizationRequest {
    /// Display name.
    pub name: String,
}

impl OrganizationRequest {
    /// Create a request with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A VPN user belonging to an organization.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct User {
    /// User ID.
    pub id: String,
    /// Owning organization ID.
    pub organization: String,
    /// User name.
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub groups: Vec<String>,
    /// Account type (`client`, `server`).
    #[serde(rename = "type", default)]
    pub user_type: Option<String>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Request body for creating or updating a user.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
    /// PIN for servers with PIN authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
}

impl UserRequest {
    /// Create a request for a user with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the email address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Enable or disable the user.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// Set the groups.
    pub fn groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }
}

/// A VPN server.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Server {
    /// Server ID.
    pub id: String,
    pub name: String,
    /// `online` or `offline`.
    #[serde(default)]
    pub status: Option<String>,
    /// VPN network in CIDR notation.
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    /// `udp` or `tcp`.
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Server {
    /// Whether the server reports itself as running.
    pub fn is_online(&self) -> bool {
        self.status.as_deref() == Some("online")
    }
}

/// Request body for creating or updating a server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
}

impl ServerRequest {
    /// Create a request for a server with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the VPN network.
    pub fn network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    /// Set the listen port and protocol.
    pub fn listen(mut self, port: u16, protocol: impl Into<String>) -> Self {
        self.port = Some(port);
        self.protocol = Some(protocol.into());
        self
    }
}

/// The server may answer a create with one object or a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub(crate) fn into_first(self) -> Option<T> {
        match self {
            Self::One(item) => Some(item),
            Self::Many(items) => items.into_iter().next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_keeps_unknown_fields() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u1",
            "organization": "o1",
            "name": "alice",
            "type": "client",
            "auth_type": "local",
            "bypass_secondary": false
        }))
        .unwrap();

        assert_eq!(user.user_type.as_deref(), Some("client"));
        assert!(!user.disabled);
        assert!(user.groups.is_empty());
        assert_eq!(user.extra["auth_type"], "local");
    }

    #[test]
    fn test_user_request_skips_unset_fields() {
        let body = serde_json::to_value(UserRequest::new("bob").groups(["ops"])).unwrap();
        assert_eq!(body, serde_json::json!({ "name": "bob", "groups": ["ops"] }));
    }

    #[test]
    fn test_one_or_many() {
        let one: OneOrMany<u8> = serde_json::from_str("7").unwrap();
        let many: OneOrMany<u8> = serde_json::from_str("[8, 9]").unwrap();
        assert_eq!(one.into_first(), Some(7));
        assert_eq!(many.into_first(), Some(8));
    }

    #[test]
    fn test_server_online() {
        let server: Server = serde_json::from_value(serde_json::json!({
            "id": "s1",
            "name": "main",
            "status": "online",
            "port": 1194,
            "protocol": "udp"
        }))
        .unwrap();
        assert!(server.is_online());
        assert_eq!(server.port, Some(1194));
    }
}
