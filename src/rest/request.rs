//! Request description passed to [`PritunlClient::execute`](crate::rest::PritunlClient::execute).

use std::collections::BTreeMap;

use reqwest::Method;
use serde::Serialize;

use crate::error::PritunlError;

/// A single API call: method, path, optional query and optional JSON payload.
///
/// # Example
///
/// ```rust
/// use pritunl_api_client::rest::Request;
///
/// let request = Request::get("/key/users").query("org", "5f1a2b3c");
/// assert_eq!(request.path(), "/key/users");
/// ```
#[derive(Debug)]
pub struct Request {
    method: Method,
    path: String,
    query: Option<BTreeMap<String, String>>,
    payload: Option<Result<Vec<u8>, serde_json::Error>>,
}

impl Request {
    /// Create a request for `path` with the given method.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            payload: None,
        }
    }

    /// Create a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Create a PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Create a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a query parameter. A repeated key replaces the earlier value.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Add several query parameters.
    pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let query = self.query.get_or_insert_with(BTreeMap::new);
        for (key, value) in pairs {
            query.insert(key.into(), value.into());
        }
        self
    }

    /// Attach a JSON payload.
    ///
    /// Serialization happens here; a failure is reported by
    /// [`PritunlClient::execute`](crate::rest::PritunlClient::execute) as
    /// [`PritunlError::Serialization`].
    pub fn json<P: Serialize + ?Sized>(mut self, payload: &P) -> Self {
        self.payload = Some(serde_json::to_vec(payload));
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The URL path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query parameters, sorted by key.
    pub fn query_params(&self) -> Option<&BTreeMap<String, String>> {
        self.query.as_ref()
    }

    /// Whether a payload has been attached.
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Check the path and split the request into its parts.
    pub(crate) fn into_parts(self) -> Result<RequestParts, PritunlError> {
        if !self.path.starts_with('/') {
            return Err(PritunlError::InvalidRequest(format!(
                "path must begin with '/': {:?}",
                self.path
            )));
        }

        let body = self.payload.transpose().map_err(PritunlError::Serialization)?;

        Ok(RequestParts {
            method: self.method,
            path: self.path,
            query: self.query,
            body,
        })
    }
}

/// A validated request with its payload already encoded.
#[derive(Debug)]
pub(crate) struct RequestParts {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Option<BTreeMap<String, String>>,
    pub(crate) body: Option<Vec<u8>>,
}
