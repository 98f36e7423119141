//! Typed REST client over a pluggable HTTP transport.
//!
//! A [`RestClient`] sends a [`Request`], checks the response status against a
//! [`StatusValidator`], picks a [`Decoder`] by the response content type, and resolves to an
//! [`Outcome`]: a decoded value, a decoded application error, or a system failure.
//! [`BlockingClient`](blocking::BlockingClient) wraps it for synchronous callers.
//!
//! # Example
//!
//! ```ignore
//! use courier::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct Widget {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! pub struct ApiError {
//!     code: String,
//! }
//!
//! let client: RestClient<_, ApiError> = RestClient::builder(HyperClient::new())
//!     .config(RestConfig::builder().log_exchanges(true).build())
//!     .build();
//!
//! let url = "https://api.example.com/widgets/1".parse()?;
//! let outcome = client.dispatch::<Widget>(Request::builder(Method::GET, url).build()).await;
//! ```

pub mod blocking;
mod config;
mod diagnostics;
mod dispatch;
pub mod prelude;
mod rest_client;
pub mod transform;
mod transport;

pub use config::{ClientConfig, ClientConfigBuilder, RestConfig, RestConfigBuilder};
pub use diagnostics::{Diagnostics, LogLevel, TracingDiagnostics};
pub use dispatch::{require, resolve};
pub use rest_client::{RestClient, RestClientBuilder};
pub use transport::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};

// Re-export tower for layer composition
pub use tower;

// Re-export core types
pub use courier_core::{
    ContentType, Decoder, DecoderRegistry, Error, FormDecoder, HttpClient, JsonDecoder, Outcome,
    Request, RequestBuilder, Response, Result, StatusValidator, TextDecoder, UnacceptableStatus,
    decode,
};

// Re-export http types for methods, status codes and headers
pub use courier_core::{HeaderMap, Method, StatusCode, header};

pub use url;
