//! HTTP response descriptor.
//!
//! [`Response`] is what a transport hands back: status, headers and an optional raw body.
//! The dispatcher only reads it.

use bytes::Bytes;
use http::HeaderMap;
use http::header::CONTENT_TYPE;

use crate::ContentType;

/// HTTP response with status, headers, and an optional body.
#[derive(Debug, Clone)]
pub struct Response<B = Bytes> {
    status: u16,
    headers: HeaderMap,
    body: Option<B>,
}

impl<B> Response<B> {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HeaderMap, body: Option<B>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Single header value by name, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// The declared media type of the body.
    ///
    /// `None` when the header is absent or has an empty essence. Bytes that are not valid
    /// UTF-8 are replaced, so such a header still names a (probably unregistered) media type.
    #[must_use]
    pub fn content_type(&self) -> Option<ContentType> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| ContentType::parse(&String::from_utf8_lossy(value.as_bytes())))
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, HeaderMap, Option<B>) {
        (self.status, self.headers, self.body)
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}
