//! Default headers.

use super::RequestTransformer;
use crate::Request;

/// Adds headers that the request does not already carry.
///
/// Existing headers win, whatever their case.
#[derive(Debug, Clone, Default)]
pub struct DefaultHeaders {
    headers: Vec<(String, String)>,
}

impl DefaultHeaders {
    /// No headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a default header.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl RequestTransformer for DefaultHeaders {
    fn transform(&self, request: &mut Request) {
        for (name, value) in &self.headers {
            if request.header(name).is_none() {
                request.headers_mut().insert(name.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Method;

    #[test]
    fn keeps_existing_headers() {
        let url = url::Url::parse("https://api.example.com").expect("url");
        let mut request = Request::builder(Method::GET, url)
            .header("accept", "text/plain")
            .build();

        DefaultHeaders::new()
            .with("Accept", "application/json")
            .with("User-Agent", "courier")
            .transform(&mut request);

        assert_eq!(request.header("Accept"), Some("text/plain"));
        assert_eq!(request.header("User-Agent"), Some("courier"));
        assert_eq!(request.headers().len(), 2);
    }
}
