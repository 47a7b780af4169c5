//! Credential management for Pritunl API authentication.

use secrecy::{ExposeSecret, SecretString};

use crate::error::PritunlError;

/// Environment variable holding the server host.
pub const HOST_ENV: &str = "PRITUNL_HOST";
/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "PRITUNL_TOKEN";
/// Environment variable holding the API secret.
pub const SECRET_ENV: &str = "PRITUNL_SECRET";

/// API credentials: the server host, the API token and the API secret.
#[derive(Clone)]
pub struct Credentials {
    /// Host (and optional port) of the Pritunl server, without scheme
    pub host: String,
    /// The API token (public identifier, sent as `Auth-Token`)
    pub token: String,
    /// The API secret (private, used for signing)
    secret: SecretString,
}

impl Credentials {
    /// Create new credentials from a host, token and secret.
    pub fn new(
        host: impl Into<String>,
        token: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            token: token.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    /// Get the API secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("token", &self.token)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager or a provider configuration block.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(
        host: impl Into<String>,
        token: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            credentials: Credentials::new(host, token, secret),
        }
    }
}

impl From<Credentials> for StaticCredentials {
    fn from(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads `PRITUNL_HOST`, `PRITUNL_TOKEN` and `PRITUNL_SECRET`.
#[derive(Debug)]
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Create credentials from the default environment variables.
    pub fn from_env() -> Result<Self, PritunlError> {
        Self::from_env_vars(HOST_ENV, TOKEN_ENV, SECRET_ENV)
    }

    /// Create credentials from custom environment variable names.
    ///
    /// Fails with [`PritunlError::MissingCredentials`] naming the first unset variable.
    pub fn from_env_vars(
        host_var: &str,
        token_var: &str,
        secret_var: &str,
    ) -> Result<Self, PritunlError> {
        let read = |var: &str| {
            std::env::var(var).map_err(|_| PritunlError::MissingCredentials(var.to_string()))
        };

        Ok(Self {
            credentials: Credentials::new(read(host_var)?, read(token_var)?, read(secret_var)?),
        })
    }

    /// Try to create credentials from the default environment variables.
    ///
    /// Returns `None` if any of the variables is not set.
    pub fn try_from_env() -> Option<Self> {
        Self::from_env().ok()
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}
