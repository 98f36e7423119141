//! Basic authentication.

use std::sync::Arc;

use base64::Engine;

use super::RequestTransformer;
use crate::Request;

/// Adds an `Authorization: Basic <base64(user:pass)>` header, replacing any existing one.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    /// Base64-encoded "username:password".
    encoded_credentials: Arc<str>,
}

impl BasicAuth {
    /// Create a new basic auth transformer with the given username and password.
    pub fn new(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        let credentials = format!("{}:{}", username.as_ref(), password.as_ref());
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        Self {
            encoded_credentials: Arc::from(encoded),
        }
    }
}

impl RequestTransformer for BasicAuth {
    fn transform(&self, request: &mut Request) {
        let headers = request.headers_mut();
        headers.retain(|name, _| !name.eq_ignore_ascii_case("Authorization"));
        headers.insert(
            "Authorization".to_string(),
            format!("Basic {}", self.encoded_credentials),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Method;

    #[test]
    fn encodes_credentials() {
        let url = url::Url::parse("https://api.example.com").expect("url");
        let mut request = Request::builder(Method::GET, url).build();

        BasicAuth::new("user", "pass").transform(&mut request);

        // base64("user:pass") = "dXNlcjpwYXNz"
        assert_eq!(request.header("Authorization"), Some("Basic dXNlcjpwYXNz"));
    }
}
