//! Request transformers.
//!
//! A [`RequestTransformer`] gets mutable access to the outgoing request right before it is
//! handed to the transport. Transformers run in registration order, on a copy of the
//! caller's request; the untouched original stays available to diagnostics.
//!
//! # Available Transformers
//!
//! - [`BearerAuth`] - Adds `Authorization: Bearer <token>` header
//! - [`BasicAuth`] - Adds `Authorization: Basic <base64>` header (`transform-basic-auth` feature)
//! - [`DefaultHeaders`] - Adds headers the request does not already set
//!
//! Any `Fn(&mut Request) + Send + Sync` closure is also a transformer.
//!
//! # Example
//!
//! ```ignore
//! use courier::{RestClient, HyperClient};
//! use courier::transform::{BearerAuth, DefaultHeaders};
//!
//! let client = RestClient::builder(HyperClient::new())
//!     .transformer(BearerAuth::new("my-token"))
//!     .transformer(DefaultHeaders::new().with("Accept", "application/json"))
//!     .transformer(|request: &mut courier::Request| {
//!         request.headers_mut().insert("X-Request-Id".into(), "42".into());
//!     })
//!     .build();
//! ```

#[cfg(feature = "transform-basic-auth")]
mod basic_auth;
mod bearer_auth;
mod headers;

#[cfg(feature = "transform-basic-auth")]
pub use basic_auth::BasicAuth;
pub use bearer_auth::BearerAuth;
pub use headers::DefaultHeaders;

use crate::Request;

/// Mutates an outgoing request before submission.
///
/// Implementations must not perform I/O.
pub trait RequestTransformer: Send + Sync + 'static {
    /// Apply the transformation.
    fn transform(&self, request: &mut Request);
}

impl<F> RequestTransformer for F
where
    F: Fn(&mut Request) + Send + Sync + 'static,
{
    fn transform(&self, request: &mut Request) {
        self(request);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::Method;

    fn request() -> Request {
        let url = url::Url::parse("https://api.example.com/widgets").expect("url");
        Request::builder(Method::GET, url).build()
    }

    #[test]
    fn closures_are_transformers() {
        let transformer = |request: &mut Request| {
            request
                .headers_mut()
                .insert("X-Trace".to_string(), "abc".to_string());
        };

        let mut request = request();
        transformer.transform(&mut request);
        assert_eq!(request.header("X-Trace"), Some("abc"));
    }

    #[test]
    fn transformers_apply_in_order() {
        let transformers: Vec<Arc<dyn RequestTransformer>> = vec![
            Arc::new(|request: &mut Request| {
                request
                    .headers_mut()
                    .insert("X-Step".to_string(), "first".to_string());
            }),
            Arc::new(|request: &mut Request| {
                let previous = request.header("X-Step").unwrap_or_default().to_string();
                request
                    .headers_mut()
                    .insert("X-Step".to_string(), format!("{previous},second"));
            }),
        ];

        let mut request = request();
        for transformer in &transformers {
            transformer.transform(&mut request);
        }
        assert_eq!(request.header("X-Step"), Some("first,second"));
    }
}
