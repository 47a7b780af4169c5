//! Responses returned by [`PritunlClient`](crate::rest::PritunlClient).

use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::PritunlError;

/// A fully read HTTP response.
///
/// Only 2xx, 401 and 404 responses reach the caller; every other status is
/// turned into [`PritunlError::Status`].
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Bytes,
}

impl Response {
    /// Whether the status is in 200–299.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Whether the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }

    /// Whether the server answered 401.
    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, PritunlError> {
        serde_json::from_slice(&self.body).map_err(PritunlError::Parse)
    }

    /// The body as UTF-8 text, lossily converted.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A response together with its decoded body.
///
/// `value` is `Some` exactly when the status was 2xx.
#[derive(Debug, Clone)]
pub struct Decoded<T> {
    /// The raw response
    pub response: Response,
    /// The decoded body, absent for 401 and 404
    pub value: Option<T>,
}

impl<T> Decoded<T> {
    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.response.status
    }

    /// Take the decoded value.
    pub fn into_value(self) -> Option<T> {
        self.value
    }
}
