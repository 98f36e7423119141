//! Content-type identifiers.

use std::fmt;

/// A normalized media type, used as the decoder registry key.
///
/// Only the essence of the header value is kept: parameters such as `charset` are dropped,
/// whitespace is trimmed and the result is lowercased, so `Application/JSON; charset=utf-8`
/// and `application/json` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentType(String);

impl ContentType {
    /// `application/json`
    pub const JSON: &'static str = "application/json";
    /// `application/x-www-form-urlencoded`
    pub const FORM_URL_ENCODED: &'static str = "application/x-www-form-urlencoded";
    /// `text/plain`
    pub const PLAIN_TEXT: &'static str = "text/plain";

    /// Parse a `Content-Type` header value.
    ///
    /// Returns `None` when the essence is empty.
    ///
    /// ```
    /// use courier_core::ContentType;
    ///
    /// let ct = ContentType::parse("Application/JSON; charset=utf-8").expect("media type");
    /// assert_eq!(ct.as_str(), "application/json");
    /// assert!(ContentType::parse(" ; charset=utf-8").is_none());
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let essence = value.split(';').next().unwrap_or_default().trim();
        if essence.is_empty() {
            return None;
        }
        Some(Self(essence.to_ascii_lowercase()))
    }

    /// `application/json`
    #[must_use]
    pub fn json() -> Self {
        Self(Self::JSON.to_string())
    }

    /// `application/x-www-form-urlencoded`
    #[must_use]
    pub fn form_url_encoded() -> Self {
        Self(Self::FORM_URL_ENCODED.to_string())
    }

    /// `text/plain`
    #[must_use]
    pub fn plain_text() -> Self {
        Self(Self::PLAIN_TEXT.to_string())
    }

    /// The normalized media type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
