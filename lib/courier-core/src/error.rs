//! Error types for courier.
//!
//! Every recoverable condition of a dispatch is one of these variants and travels through
//! [`Outcome::SystemFailure`](crate::Outcome::SystemFailure). Decoded application errors are
//! not represented here; they are the caller's own type.

use derive_more::{Display, Error, From};

/// Main error type for courier operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// The response body could not be decoded into the expected type.
    #[display("cannot decode {content_type} body at '{path}': {message}")]
    #[from(skip)]
    Decode {
        /// Content type of the body.
        content_type: String,
        /// Path to the offending field (e.g. `user.address.city`), `.` for the root.
        path: String,
        /// Error message.
        message: String,
    },

    /// No decoder is registered for the response content type.
    #[display("no decoder registered for content type '{content_type}'")]
    #[from(skip)]
    MissingDecoder {
        /// The content type observed on the response.
        content_type: String,
    },

    /// A non-optional result was requested but the response carried no body.
    #[display("expected a `{expected}` but the response has no body")]
    #[from(skip)]
    EmptyBody {
        /// Name of the expected type.
        expected: &'static str,
    },

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// The blocking runtime could not be started.
    #[display("runtime error: {_0}")]
    #[from]
    Runtime(std::io::Error),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a decode error.
    #[must_use]
    pub fn decode(
        content_type: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Decode {
            content_type: content_type.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a missing decoder error.
    #[must_use]
    pub fn missing_decoder(content_type: impl Into<String>) -> Self {
        Self::MissingDecoder {
            content_type: content_type.into(),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if the request never produced a response.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connection(_)
                | Self::Tls(_)
                | Self::Timeout
                | Self::InvalidRequest(_)
                | Self::InvalidUrl(_)
        )
    }

    /// Returns `true` if a response body failed to decode.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Returns `true` if this error points at a client setup defect rather than a runtime condition.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingDecoder { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::Timeout;
        assert_eq!(err.to_string(), "request timeout");

        let err = Error::connection("failed to connect");
        assert_eq!(err.to_string(), "connection error: failed to connect");

        let err = Error::decode("application/json", "user.id", "invalid type: string");
        assert_eq!(
            err.to_string(),
            "cannot decode application/json body at 'user.id': invalid type: string"
        );

        let err = Error::missing_decoder("text/csv");
        assert_eq!(
            err.to_string(),
            "no decoder registered for content type 'text/csv'"
        );

        let err = Error::EmptyBody { expected: "Widget" };
        assert_eq!(
            err.to_string(),
            "expected a `Widget` but the response has no body"
        );
    }

    #[test]
    fn error_classification() {
        assert!(Error::Timeout.is_timeout());
        assert!(Error::Timeout.is_transport());
        assert!(Error::connection("refused").is_transport());
        assert!(Error::tls("bad certificate").is_transport());
        assert!(!Error::connection("refused").is_decode());

        let decode = Error::decode("application/json", ".", "EOF");
        assert!(decode.is_decode());
        assert!(!decode.is_transport());

        let missing = Error::missing_decoder("text/csv");
        assert!(missing.is_configuration());
        assert!(!missing.is_transport());
        assert!(!missing.is_decode());
    }

    #[test]
    fn error_from_url() {
        let err: Error = url::Url::parse("not a url")
            .map_err(Error::from)
            .expect_err("invalid url");
        assert!(matches!(err, Error::InvalidUrl(_)));
        assert!(err.is_transport());
    }
}
