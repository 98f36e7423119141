//! HTTP transport implementation using hyper-util.
//!
//! [`HyperClient`] is the bundled [`HttpClient`]: pooled connections, rustls with the
//! Mozilla roots, a request timeout, and optional Tower layers around the raw exchange.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tower::Layer;
use tower::util::BoxCloneService;
use tower_service::Service;

use crate::{
    Error, HttpClient, Request, Response, Result,
    config::{ClientConfig, ClientConfigBuilder},
};

/// Type-erased service for layer composition.
pub type BoxedService = BoxCloneService<Request, Response, Error>;

/// Future type for Tower Service implementation.
pub type ServiceFuture = Pin<Box<dyn Future<Output = Result<Response>> + Send + 'static>>;

/// Mutex-guarded [`BoxedService`], so the client is `Sync` as [`HttpClient`] requires.
#[derive(Clone)]
struct SyncService {
    inner: Arc<Mutex<BoxedService>>,
}

impl SyncService {
    fn new(service: BoxedService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    fn call(&self, request: Request) -> ServiceFuture {
        // Clone out of the lock; the call itself runs unlocked
        let mut service = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();

        Box::pin(async move { service.call(request).await })
    }
}

/// HTTPS connector (HTTP/1.1 and HTTP/2) honouring the connect timeout.
fn https_connector(config: &ClientConfig) -> HttpsConnector<HttpConnector> {
    let root_store: rustls::RootCertStore =
        webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();

    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let mut http = HttpConnector::new();
    http.enforce_http(false);
    http.set_connect_timeout(Some(config.connect_timeout));

    HttpsConnectorBuilder::new()
        .with_tls_config(tls_config)
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .wrap_connector(http)
}

/// The bare hyper exchange, without layers.
#[derive(Clone)]
struct RawHyperClient {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: ClientConfig,
}

impl RawHyperClient {
    fn new(config: ClientConfig) -> Self {
        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(https_connector(&config));

        Self { inner, config }
    }

    fn build_hyper_request(request: Request) -> Result<http::Request<Full<Bytes>>> {
        let (method, url, headers, body) = request.into_parts();

        let mut builder = http::Request::builder().method(method).uri(url.as_str());
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder
            .body(body.map_or_else(Full::default, Full::new))
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    async fn execute(&self, request: Request) -> Result<Response> {
        let hyper_request = Self::build_hyper_request(request)?;

        let response = tokio::time::timeout(self.config.timeout, self.inner.request(hyper_request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(Self::map_hyper_error)?;

        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();

        // A received response always has a body, possibly empty
        Ok(Response::new(parts.status.as_u16(), parts.headers, Some(body)))
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
        let msg = err.to_string();

        if err.is_connect() {
            return Error::connection(msg);
        }

        if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
            return Error::tls(msg);
        }

        Error::connection(msg)
    }
}

impl Service<Request> for RawHyperClient {
    type Response = Response;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let client = self.clone();
        Box::pin(async move { client.execute(request).await })
    }
}

/// HTTP transport using hyper-util with connection pooling, TLS, and optional Tower layers.
///
/// # Example
///
/// ```ignore
/// use courier::{HyperClient, Request};
/// use std::time::Duration;
///
/// let client = HyperClient::builder()
///     .timeout(Duration::from_secs(10))
///     .layer(tower::util::MapRequestLayer::new(|mut request: Request| {
///         request.headers_mut().insert("X-Client".into(), "courier".into());
///         request
///     }))
///     .build();
/// ```
#[derive(Clone)]
pub struct HyperClient {
    service: SyncService,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Create a new client with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let raw = RawHyperClient::new(config.clone());
        Self {
            service: SyncService::new(BoxCloneService::new(raw)),
            config,
        }
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for HyperClient {
    async fn execute(&self, request: Request) -> Result<Response> {
        self.service.call(request).await
    }
}

impl Service<Request> for HyperClient {
    type Response = Response;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        self.service.call(request)
    }
}

/// Builder for [`HyperClient`].
#[derive(Default)]
pub struct HyperClientBuilder {
    config: ClientConfigBuilder,
    layers: Vec<Arc<dyn Fn(BoxedService) -> BoxedService + Send + Sync>>,
}

impl std::fmt::Debug for HyperClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClientBuilder")
            .field("config", &self.config)
            .field("layers_count", &self.layers.len())
            .finish()
    }
}

impl HyperClientBuilder {
    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Add a Tower layer around the raw exchange.
    ///
    /// Layers are applied in order: first added = innermost.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + Sync + 'static,
        L::Service: Service<Request, Response = Response, Error = Error> + Clone + Send + 'static,
        <L::Service as Service<Request>>::Future: Send,
    {
        self.layers.push(Arc::new(move |service| {
            BoxCloneService::new(layer.layer(service))
        }));
        self
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> HyperClient {
        let config = self.config.build();
        let mut service: BoxedService = BoxCloneService::new(RawHyperClient::new(config.clone()));

        for layer_fn in self.layers {
            service = layer_fn(service);
        }

        HyperClient {
            service: SyncService::new(service),
            config,
        }
    }
}
