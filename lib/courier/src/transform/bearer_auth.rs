//! Bearer token authentication.

use std::sync::Arc;

use super::RequestTransformer;
use crate::Request;

/// Adds an `Authorization: Bearer <token>` header, replacing any existing one.
///
/// # Example
///
/// ```ignore
/// use courier::transform::BearerAuth;
///
/// let client = RestClient::builder(http)
///     .transformer(BearerAuth::new("my-secret-token"))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct BearerAuth {
    token: Arc<str>,
}

impl BearerAuth {
    /// Create a new bearer auth transformer with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }
}

impl RequestTransformer for BearerAuth {
    fn transform(&self, request: &mut Request) {
        let headers = request.headers_mut();
        headers.retain(|name, _| !name.eq_ignore_ascii_case("Authorization"));
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.token),
        );
    }
}
