//! Exchange diagnostics.
//!
//! A [`Diagnostics`] collaborator observes each dispatch: the original and transformed
//! request before submission, then the transport result. It never changes the outcome.
//! [`TracingDiagnostics`] is the bundled implementation and is installed by
//! [`RestConfig::log_exchanges`](crate::RestConfig::log_exchanges).

use tracing::{Level, debug, info, span, warn};

use crate::{Request, Response, Result};

/// Observer of request/response exchanges.
pub trait Diagnostics: Send + Sync + 'static {
    /// Called before submission with the caller's request and the transformed one.
    fn request(&self, original: &Request, transformed: &Request);

    /// Called once the transport completes.
    fn response(&self, request: &Request, result: &Result<Response>);
}

/// Log level for [`TracingDiagnostics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log at debug level (headers and bodies).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

/// Dumps exchanges through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics {
    level: LogLevel,
}

impl TracingDiagnostics {
    /// Create a diagnostics sink logging at `level`.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// The configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

/// Body as text when it is valid UTF-8.
fn body_text(body: Option<&bytes::Bytes>) -> Option<&str> {
    body.and_then(|body| std::str::from_utf8(body).ok())
}

impl Diagnostics for TracingDiagnostics {
    fn request(&self, original: &Request, transformed: &Request) {
        let method = transformed.method();
        let url = transformed.url().as_str();
        let _span = span!(Level::INFO, "http_request", %method, url).entered();

        match self.level {
            LogLevel::Debug => {
                debug!(
                    method = %original.method(),
                    url = original.url().as_str(),
                    headers = ?original.headers(),
                    body = ?body_text(original.body()),
                    "original request"
                );
                debug!(
                    %method,
                    url,
                    headers = ?transformed.headers(),
                    body = ?body_text(transformed.body()),
                    "sending request"
                );
            }
            LogLevel::Info => {
                info!(%method, url, "sending request");
            }
        }
    }

    fn response(&self, request: &Request, result: &Result<Response>) {
        let method = request.method();
        let url = request.url().as_str();
        let _span = span!(Level::INFO, "http_request", %method, url).entered();

        match result {
            Ok(response) => {
                let status = response.status();
                let content_type = response.content_type().map(|ct| ct.to_string());
                if self.level == LogLevel::Debug {
                    debug!(
                        %method,
                        url,
                        status,
                        ?content_type,
                        headers = ?response.headers(),
                        body = ?body_text(response.body()),
                        "response received"
                    );
                } else if response.is_success() {
                    info!(%method, url, status, "request completed");
                } else {
                    warn!(%method, url, status, "request failed with HTTP error");
                }
            }
            Err(err) => {
                warn!(%method, url, error = %err, "request failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderMap;

    use super::*;
    use crate::{Error, Method};

    #[test]
    fn default_level_is_info() {
        let diagnostics = TracingDiagnostics::default();
        assert_eq!(diagnostics.level(), LogLevel::Info);
    }

    #[test]
    fn debug_level() {
        let diagnostics = TracingDiagnostics::new(LogLevel::Debug);
        assert_eq!(diagnostics.level(), LogLevel::Debug);
    }

    #[test]
    fn body_text_requires_utf8() {
        let text = bytes::Bytes::from("hello");
        assert_eq!(body_text(Some(&text)), Some("hello"));

        let binary = bytes::Bytes::from_static(&[0xff, 0x00]);
        assert_eq!(body_text(Some(&binary)), None);
        assert_eq!(body_text(None), None);
    }

    #[test]
    fn logging_without_subscriber_is_harmless() {
        let url = url::Url::parse("https://api.example.com").expect("url");
        let request = Request::builder(Method::GET, url).build();

        for level in [LogLevel::Info, LogLevel::Debug] {
            let diagnostics = TracingDiagnostics::new(level);
            diagnostics.request(&request, &request);
            diagnostics.response(&request, &Ok(Response::new(404, HeaderMap::new(), None)));
            diagnostics.response(&request, &Err(Error::Timeout));
        }
    }
}
