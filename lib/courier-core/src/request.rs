//! HTTP request descriptor.
//!
//! Use [`Request::builder`] to construct requests with headers, query parameters, and bodies.
//!
//! # Example
//!
//! ```
//! use courier_core::{Method, Request};
//!
//! let request = Request::builder(Method::GET, "https://api.example.com/widgets".parse().unwrap())
//!     .header("Accept", "application/json")
//!     .query("page", "1")
//!     .build();
//! assert_eq!(request.url().as_str(), "https://api.example.com/widgets?page=1");
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use http::Method;
use url::Url;

use crate::{ContentType, Result};

/// An outbound HTTP request: method, URL, headers, and an optional body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: Url) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name (ASCII case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, Url, HashMap<String, String>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            request: Request {
                method,
                url,
                headers: HashMap::new(),
                body: None,
            },
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.insert(name.into(), value.into());
        self
    }

    /// Appends a query parameter to the URL.
    #[must_use]
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.request.url.query_pairs_mut().append_pair(name, value);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    /// Set a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(self, value: &T) -> Result<Self> {
        let body = serde_json::to_vec(value)?;
        Ok(self.header("Content-Type", ContentType::JSON).body(body))
    }

    /// Set a form-urlencoded body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn form<T: serde::Serialize>(self, value: &T) -> Result<Self> {
        let body = serde_html_form::to_string(value)?;
        Ok(self
            .header("Content-Type", ContentType::FORM_URL_ENCODED)
            .body(body))
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request {
        self.request
    }
}
