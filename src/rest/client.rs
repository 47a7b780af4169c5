//! Pritunl REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{AuthContext, CredentialsProvider, NonceProvider, RandomNonce, sign_request};
use crate::error::PritunlError;
use crate::rest::endpoints::headers;
use crate::rest::request::Request;
use crate::rest::response::{Decoded, Response};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Environment variable that disables TLS certificate verification when set to `true` or `1`.
pub const INSECURE_ENV: &str = "PRITUNL_INSECURE";

/// The Pritunl REST API client.
///
/// Every request is signed with the configured credentials. The client is
/// cheap to clone; clones share one connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use pritunl_api_client::auth::StaticCredentials;
/// use pritunl_api_client::rest::{PritunlClient, Request};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("vpn.example.com", "token", "secret"));
///     let client = PritunlClient::builder().credentials(credentials).build()?;
///
///     let response = client.execute(Request::get("/status")).await?;
///     println!("{}: {}", response.status, response.text());
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct PritunlClient {
    http_client: ClientWithMiddleware,
    base_url: Option<String>,
    credentials: Arc<dyn CredentialsProvider>,
    nonce_provider: Arc<dyn NonceProvider>,
    accept_invalid_certs: bool,
    timeout: Duration,
}

impl PritunlClient {
    /// Create a new client builder.
    pub fn builder() -> PritunlClientBuilder {
        PritunlClientBuilder::new()
    }

    /// Sign and send a request, returning the fully read response.
    ///
    /// 401 and 404 are returned as `Ok` so callers can branch on
    /// [`Response::status`]. Any other status outside 2xx is an error.
    pub async fn execute(&self, request: Request) -> Result<Response, PritunlError> {
        let parts = request.into_parts()?;
        let url = self.url_for(&parts.path, parts.query.as_ref())?;

        let creds = self.credentials.get_credentials();
        let context = AuthContext::generate(self.nonce_provider.as_ref());
        let signature = sign_request(creds, &context, parts.method.as_str(), &parts.path)?;

        let mut builder = self
            .http_client
            .request(parts.method.clone(), url.clone())
            .header(headers::AUTH_TOKEN, header_value(&creds.token)?)
            .header(headers::AUTH_TIMESTAMP, context.timestamp.to_string())
            .header(headers::AUTH_NONCE, header_value(&context.nonce)?)
            .header(headers::AUTH_SIGNATURE, signature);

        if let Some(body) = parts.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body);
        }

        debug!(method = %parts.method, %url, "sending Pritunl request");
        let response = builder.send().await?;
        let status = response.status();
        debug!(method = %parts.method, %url, %status, "received Pritunl response");

        if status == StatusCode::NOT_FOUND || status == StatusCode::UNAUTHORIZED {
            return read_response(response).await;
        }

        if !status.is_success() {
            // Best effort: the body only enriches the error.
            let body = response.text().await.unwrap_or_default();
            return Err(PritunlError::Status { status, body });
        }

        read_response(response).await
    }

    /// Sign and send a request and decode a 2xx body as JSON.
    ///
    /// For 401 and 404 the body is not parsed and `value` is `None`.
    pub async fn execute_json<T>(&self, request: Request) -> Result<Decoded<T>, PritunlError>
    where
        T: DeserializeOwned,
    {
        let response = self.execute(request).await?;
        let value = if response.is_success() {
            Some(response.json()?)
        } else {
            None
        };

        Ok(Decoded { response, value })
    }

    /// Send a request whose 2xx body is not needed.
    pub(crate) async fn execute_unit(&self, request: Request) -> Result<Response, PritunlError> {
        let response = self.execute(request).await?;
        if response.is_unauthorized() {
            return Err(PritunlError::Unauthorized);
        }
        Ok(response)
    }

    /// Decode a 2xx body, mapping 404 to `None` and 401 to an error.
    pub(crate) async fn fetch<T>(&self, request: Request) -> Result<Option<T>, PritunlError>
    where
        T: DeserializeOwned,
    {
        let decoded = self.execute_json(request).await?;
        if decoded.response.is_unauthorized() {
            return Err(PritunlError::Unauthorized);
        }
        Ok(decoded.value)
    }

    /// Like [`fetch`](Self::fetch) but a 404 is an error.
    pub(crate) async fn fetch_required<T>(&self, request: Request) -> Result<T, PritunlError>
    where
        T: DeserializeOwned,
    {
        let decoded = self.execute_json(request).await?;
        match decoded.value {
            Some(value) => Ok(value),
            None if decoded.response.is_unauthorized() => Err(PritunlError::Unauthorized),
            None => Err(PritunlError::Status {
                status: decoded.response.status,
                body: decoded.response.text(),
            }),
        }
    }

    /// Build the full URL for `path`.
    fn url_for(
        &self,
        path: &str,
        query: Option<&std::collections::BTreeMap<String, String>>,
    ) -> Result<Url, PritunlError> {
        let base = match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}", self.credentials.get_credentials().host),
        };

        let mut url = Url::parse(&format!("{base}{path}"))?;
        // The signature covers `path`, so the URL must send it unchanged.
        if url.path() != path {
            return Err(PritunlError::InvalidRequest(format!(
                "path {path:?} would be sent as {:?}",
                url.path()
            )));
        }
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }
}

/// Read the whole body so the connection is released before returning.
async fn read_response(response: reqwest::Response) -> Result<Response, PritunlError> {
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await.map_err(PritunlError::Read)?;
    Ok(Response {
        status,
        headers,
        body,
    })
}

fn header_value(value: &str) -> Result<HeaderValue, PritunlError> {
    HeaderValue::from_str(value)
        .map_err(|e| PritunlError::InvalidRequest(format!("invalid header value: {e}")))
}

impl std::fmt::Debug for PritunlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PritunlClient")
            .field("base_url", &self.base_url)
            .field("host", &self.credentials.get_credentials().host)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for [`PritunlClient`].
pub struct PritunlClientBuilder {
    base_url: Option<String>,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
    timeout: Duration,
    accept_invalid_certs: bool,
}

impl PritunlClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Certificate verification is enabled and the timeout is two minutes.
    pub fn new() -> Self {
        Self {
            base_url: None,
            credentials: None,
            nonce_provider: None,
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }

    /// Create a builder configured from the environment.
    ///
    /// Reads credentials via [`EnvCredentials`](crate::auth::EnvCredentials)
    /// and honours `PRITUNL_INSECURE`.
    pub fn from_env() -> Result<Self, PritunlError> {
        let credentials = crate::auth::EnvCredentials::from_env()?;
        let insecure = std::env::var(INSECURE_ENV)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Ok(Self::new()
            .credentials(Arc::new(credentials))
            .accept_invalid_certs(insecure))
    }

    /// Override the base URL, e.g. `http://127.0.0.1:9700` for a mock server.
    ///
    /// Without an override requests go to `https://{credentials.host}`. The
    /// override must not carry a path of its own.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the credentials provider.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Skip TLS certificate verification.
    ///
    /// Only for servers with self-signed certificates on trusted networks.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<PritunlClient, PritunlError> {
        let credentials = self
            .credentials
            .ok_or_else(|| PritunlError::MissingCredentials("credentials".to_string()))?;

        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("pritunl-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .map_err(|e| PritunlError::InvalidRequest(format!("invalid user agent: {e}")))?;
        headers.insert(USER_AGENT, header_value);

        if self.accept_invalid_certs {
            warn!(
                host = %credentials.get_credentials().host,
                "TLS certificate verification is disabled for this Pritunl client"
            );
        }

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(PritunlError::Build)?;

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(RandomNonce::new()));

        Ok(PritunlClient {
            http_client: client,
            base_url: self.base_url,
            credentials,
            nonce_provider,
            accept_invalid_certs: self.accept_invalid_certs,
            timeout: self.timeout,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true")
}

impl Default for PritunlClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
