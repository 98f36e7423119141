//! Typed REST dispatcher.
//!
//! [`RestClient`] ties a transport to a decoder registry, a status validator, request
//! transformers and optional diagnostics. Each dispatch is a single round-trip; the only
//! suspension point is the transport call.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;

use crate::config::RestConfig;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::dispatch::{require, resolve};
use crate::transform::RequestTransformer;
use crate::{
    ContentType, Decoder, DecoderRegistry, HttpClient, Outcome, Request, StatusValidator,
};

/// Dispatches requests and resolves typed outcomes.
///
/// `E` is the application error type, decoded from the body of a response whose status the
/// validator rejects. Use `serde_json::Value` when the error payload has no fixed shape.
///
/// # Example
///
/// ```ignore
/// use courier::prelude::*;
///
/// #[derive(Debug, Deserialize)]
/// struct Widget { id: u64, name: String }
///
/// #[derive(Debug, Deserialize)]
/// struct ApiError { code: String }
///
/// let client: RestClient<_, ApiError> = RestClient::builder(HyperClient::new()).build();
/// let request = Request::builder(Method::GET, "https://api.example.com/widgets/1".parse()?).build();
///
/// match client.dispatch::<Widget>(request).await {
///     Outcome::Success(widget) => println!("{widget:?}"),
///     Outcome::Failure { status, error } => println!("{status}: {}", error.code),
///     Outcome::SystemFailure(err) => println!("{err}"),
/// }
/// ```
pub struct RestClient<C, E> {
    transport: C,
    decoders: Arc<DecoderRegistry>,
    validator: StatusValidator,
    transformers: Arc<[Arc<dyn RequestTransformer>]>,
    diagnostics: Option<Arc<dyn Diagnostics>>,
    _error: PhantomData<fn() -> E>,
}

impl<C: Clone, E> Clone for RestClient<C, E> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            decoders: Arc::clone(&self.decoders),
            validator: self.validator.clone(),
            transformers: Arc::clone(&self.transformers),
            diagnostics: self.diagnostics.clone(),
            _error: PhantomData,
        }
    }
}

impl<C: fmt::Debug, E> fmt::Debug for RestClient<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("transport", &self.transport)
            .field("decoders", &self.decoders)
            .field("validator", &self.validator)
            .field("transformers_count", &self.transformers.len())
            .field("diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}

impl<C, E> RestClient<C, E>
where
    C: HttpClient,
    E: DeserializeOwned,
{
    /// Create a new client builder around `transport`.
    pub fn builder(transport: C) -> RestClientBuilder<C, E> {
        RestClientBuilder::new(transport)
    }

    /// The transport.
    #[must_use]
    pub const fn transport(&self) -> &C {
        &self.transport
    }

    /// The decoder registry.
    #[must_use]
    pub fn decoders(&self) -> &DecoderRegistry {
        &self.decoders
    }

    /// The status validator.
    #[must_use]
    pub const fn validator(&self) -> &StatusValidator {
        &self.validator
    }

    /// Dispatch `request`, allowing an empty success.
    ///
    /// Resolves to `Success(None)` when the response has no content type or no body.
    pub async fn dispatch_optional<T>(&self, request: Request) -> Outcome<Option<T>, E>
    where
        T: DeserializeOwned,
    {
        let mut transformed = request.clone();
        for transformer in self.transformers.iter() {
            transformer.transform(&mut transformed);
        }

        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.request(&request, &transformed);
        }

        let result = match &self.diagnostics {
            Some(diagnostics) => {
                let result = self.transport.execute(transformed.clone()).await;
                diagnostics.response(&transformed, &result);
                result
            }
            None => self.transport.execute(transformed).await,
        };

        resolve(result, &self.decoders, &self.validator)
    }

    /// Dispatch `request`, requiring a value.
    ///
    /// An empty success resolves to `SystemFailure(Error::EmptyBody)`.
    pub async fn dispatch<T>(&self, request: Request) -> Outcome<T, E>
    where
        T: DeserializeOwned,
    {
        require(self.dispatch_optional(request).await)
    }
}

impl<C, E> RestClient<C, E>
where
    C: HttpClient + Clone + 'static,
    E: DeserializeOwned + Send + 'static,
{
    /// A self-contained task resolving `request` and handing the outcome to `completion`.
    pub(crate) fn task<T, F>(
        &self,
        request: Request,
        completion: F,
    ) -> impl Future<Output = ()> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Outcome<T, E>) + Send + 'static,
    {
        let client = self.clone();
        async move {
            let outcome = client.dispatch::<T>(request).await;
            completion(outcome);
        }
    }

    /// [`task`](Self::task) for the optional-capable dispatch.
    pub(crate) fn task_optional<T, F>(
        &self,
        request: Request,
        completion: F,
    ) -> impl Future<Output = ()> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Outcome<Option<T>, E>) + Send + 'static,
    {
        let client = self.clone();
        async move {
            let outcome = client.dispatch_optional::<T>(request).await;
            completion(outcome);
        }
    }

    /// Run [`dispatch`](Self::dispatch) as a Tokio task and call `completion` with the outcome.
    ///
    /// `completion` runs exactly once, on a runtime worker thread, unless the task is aborted
    /// through the returned handle first, in which case it never runs.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn<T, F>(&self, request: Request, completion: F) -> JoinHandle<()>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Outcome<T, E>) + Send + 'static,
    {
        tokio::spawn(self.task(request, completion))
    }

    /// Run [`dispatch_optional`](Self::dispatch_optional) as a Tokio task.
    ///
    /// Same completion contract as [`spawn`](Self::spawn).
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn_optional<T, F>(&self, request: Request, completion: F) -> JoinHandle<()>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Outcome<Option<T>, E>) + Send + 'static,
    {
        tokio::spawn(self.task_optional(request, completion))
    }
}

/// Builder for [`RestClient`].
pub struct RestClientBuilder<C, E> {
    transport: C,
    decoders: DecoderRegistry,
    config: RestConfig,
    transformers: Vec<Arc<dyn RequestTransformer>>,
    diagnostics: Option<Arc<dyn Diagnostics>>,
    _error: PhantomData<fn() -> E>,
}

impl<C: fmt::Debug, E> fmt::Debug for RestClientBuilder<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClientBuilder")
            .field("transport", &self.transport)
            .field("decoders", &self.decoders)
            .field("config", &self.config)
            .field("transformers_count", &self.transformers.len())
            .field("diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}

impl<C, E> RestClientBuilder<C, E> {
    /// Builder with the default decoders and configuration.
    pub fn new(transport: C) -> Self {
        Self {
            transport,
            decoders: DecoderRegistry::default(),
            config: RestConfig::default(),
            transformers: Vec::new(),
            diagnostics: None,
            _error: PhantomData,
        }
    }

    /// Replace the decoder registry.
    #[must_use]
    pub fn decoders(mut self, decoders: DecoderRegistry) -> Self {
        self.decoders = decoders;
        self
    }

    /// Register one more decoder; a decoder already registered for the content type is replaced.
    #[must_use]
    pub fn decoder(mut self, content_type: ContentType, decoder: impl Decoder) -> Self {
        self.decoders.register(content_type, decoder);
        self
    }

    /// Replace the configuration.
    #[must_use]
    pub fn config(mut self, config: RestConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a request transformer; transformers run in the order they are added.
    #[must_use]
    pub fn transformer(mut self, transformer: impl RequestTransformer) -> Self {
        self.transformers.push(Arc::new(transformer));
        self
    }

    /// Use a custom diagnostics sink, regardless of [`RestConfig::log_exchanges`].
    #[must_use]
    pub fn diagnostics(mut self, diagnostics: impl Diagnostics) -> Self {
        self.diagnostics = Some(Arc::new(diagnostics));
        self
    }

    /// Build the client.
    pub fn build(self) -> RestClient<C, E> {
        let log_level = self.config.log_level;
        let diagnostics = self.diagnostics.or_else(|| {
            self.config.log_exchanges.then(|| {
                Arc::new(TracingDiagnostics::new(log_level)) as Arc<dyn Diagnostics>
            })
        });

        RestClient {
            transport: self.transport,
            decoders: Arc::new(self.decoders),
            validator: StatusValidator::new(self.config.acceptable_status),
            transformers: self.transformers.into(),
            diagnostics,
            _error: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert2::{check, let_assert};
    use bytes::Bytes;
    use http::header::CONTENT_TYPE;
    use http::{HeaderMap, HeaderValue};
    use serde::Deserialize;

    use super::*;
    use crate::{Error, Method, Response, Result};

    #[derive(Debug, PartialEq, Deserialize)]
    struct Widget {
        id: u64,
        name: String,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct ApiError {
        code: String,
    }

    /// Answers every request with a fixed response and remembers what it was sent.
    #[derive(Clone)]
    struct StubTransport {
        status: u16,
        content_type: Option<&'static str>,
        body: Option<&'static str>,
        seen: Arc<Mutex<Vec<Request>>>,
    }

    impl StubTransport {
        fn new(status: u16, content_type: Option<&'static str>, body: Option<&'static str>) -> Self {
            Self {
                status,
                content_type,
                body,
                seen: Arc::default(),
            }
        }

        fn seen(&self) -> Vec<Request> {
            self.seen.lock().expect("lock").clone()
        }
    }

    impl HttpClient for StubTransport {
        async fn execute(&self, request: Request) -> Result<Response> {
            self.seen.lock().expect("lock").push(request);
            let mut headers = HeaderMap::new();
            if let Some(content_type) = self.content_type {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
            }
            Ok(Response::new(
                self.status,
                headers,
                self.body.map(|body| Bytes::from_static(body.as_bytes())),
            ))
        }
    }

    /// Records every diagnostics call.
    #[derive(Clone, Default)]
    struct Recorder {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl Diagnostics for Recorder {
        fn request(&self, original: &Request, transformed: &Request) {
            self.events.lock().expect("lock").push(format!(
                "request original={:?} transformed={:?}",
                original.header("Authorization"),
                transformed.header("Authorization")
            ));
        }

        fn response(&self, _request: &Request, result: &Result<Response>) {
            let status = result.as_ref().map(Response::status).ok();
            self.events
                .lock()
                .expect("lock")
                .push(format!("response {status:?}"));
        }
    }

    fn request() -> Request {
        let url = url::Url::parse("https://api.example.com/widgets/1").expect("url");
        Request::builder(Method::GET, url).build()
    }

    #[tokio::test]
    async fn dispatch_success() {
        let transport = StubTransport::new(200, Some("application/json"), Some(r#"{"id":1,"name":"a"}"#));
        let client: RestClient<_, ApiError> = RestClient::builder(transport).build();

        let_assert!(Outcome::Success(widget) = client.dispatch::<Widget>(request()).await);
        check!(
            widget
                == Widget {
                    id: 1,
                    name: "a".to_string()
                }
        );
    }

    #[tokio::test]
    async fn dispatch_requires_body() {
        let transport = StubTransport::new(204, None, None);
        let client: RestClient<_, ApiError> = RestClient::builder(transport).build();

        let_assert!(Outcome::SystemFailure(Error::EmptyBody { .. }) = client.dispatch::<Widget>(request()).await);
    }

    #[tokio::test]
    async fn dispatch_optional_allows_empty_body() {
        let transport = StubTransport::new(204, None, None);
        let client: RestClient<_, ApiError> = RestClient::builder(transport).build();

        let outcome = client.dispatch_optional::<Widget>(request()).await;
        check!(matches!(outcome, Outcome::Success(None)));
    }

    #[tokio::test]
    async fn transformers_run_in_order_on_a_copy() {
        let transport = StubTransport::new(204, None, None);
        let client: RestClient<_, ApiError> = RestClient::builder(transport.clone())
            .transformer(|request: &mut Request| {
                request
                    .headers_mut()
                    .insert("X-Step".to_string(), "first".to_string());
            })
            .transformer(|request: &mut Request| {
                let previous = request.header("X-Step").unwrap_or_default().to_string();
                request
                    .headers_mut()
                    .insert("X-Step".to_string(), format!("{previous},second"));
            })
            .build();

        let original = request();
        let _ = client.dispatch_optional::<Widget>(original.clone()).await;

        let seen = transport.seen();
        check!(seen.len() == 1);
        check!(seen[0].header("X-Step") == Some("first,second"));
        check!(original.header("X-Step").is_none());
    }

    #[tokio::test]
    async fn custom_acceptable_status() {
        let transport = StubTransport::new(404, Some("application/json"), Some(r#"{"id":1,"name":"a"}"#));
        let client: RestClient<_, ApiError> = RestClient::builder(transport)
            .config(RestConfig::builder().acceptable_status(200..=404).build())
            .build();

        check!(client.validator().accepts(404));
        check!(client.dispatch::<Widget>(request()).await.is_success());
    }

    #[tokio::test]
    async fn custom_decoder_replaces_default() {
        struct Fixed;

        impl crate::Decoder for Fixed {
            fn content_type(&self) -> &str {
                "application/json"
            }

            fn decode_value(&self, _body: &[u8]) -> Result<serde_json::Value> {
                Ok(serde_json::json!({"id": 7, "name": "fixed"}))
            }
        }

        let transport = StubTransport::new(200, Some("application/json"), Some("ignored"));
        let client: RestClient<_, ApiError> = RestClient::builder(transport)
            .decoder(crate::ContentType::json(), Fixed)
            .build();

        let_assert!(Outcome::Success(widget) = client.dispatch::<Widget>(request()).await);
        check!(widget.id == 7);
    }

    #[tokio::test]
    async fn diagnostics_see_original_and_transformed_request() {
        let recorder = Recorder::default();
        let transport = StubTransport::new(404, Some("application/json"), Some(r#"{"code":"not_found"}"#));
        let client: RestClient<_, ApiError> = RestClient::builder(transport)
            .transformer(crate::transform::BearerAuth::new("token"))
            .diagnostics(recorder.clone())
            .build();

        let outcome = client.dispatch::<Widget>(request()).await;
        check!(outcome.failure_status() == Some(404));

        let events = recorder.events.lock().expect("lock").clone();
        check!(
            events
                == vec![
                    "request original=None transformed=Some(\"Bearer token\")".to_string(),
                    "response Some(404)".to_string(),
                ]
        );
    }

    #[tokio::test]
    async fn diagnostics_are_off_by_default() {
        let transport = StubTransport::new(204, None, None);
        let client: RestClient<_, ApiError> = RestClient::builder(transport).build();
        check!(client.diagnostics.is_none());

        let transport = StubTransport::new(204, None, None);
        let client: RestClient<_, ApiError> = RestClient::builder(transport)
            .config(RestConfig::builder().log_exchanges(true).build())
            .build();
        check!(client.diagnostics.is_some());
        check!(client.dispatch_optional::<Widget>(request()).await.is_success());
    }

    #[tokio::test]
    async fn spawn_hands_outcome_to_completion() {
        let transport = StubTransport::new(200, Some("application/json"), Some(r#"{"id":1,"name":"a"}"#));
        let client: RestClient<_, ApiError> = RestClient::builder(transport).build();

        let (tx, rx) = tokio::sync::oneshot::channel();
        let handle = client.spawn::<Widget, _>(request(), move |outcome| {
            let _ = tx.send(outcome);
        });

        handle.await.expect("task");
        let_assert!(Ok(Outcome::Success(widget)) = rx.await);
        check!(widget.name == "a");
    }

    #[tokio::test]
    async fn aborted_spawn_never_completes() {
        #[derive(Clone)]
        struct Pending;

        impl HttpClient for Pending {
            async fn execute(&self, _request: Request) -> Result<Response> {
                std::future::pending().await
            }
        }

        let client: RestClient<_, ApiError> = RestClient::builder(Pending).build();
        let (tx, rx) = tokio::sync::oneshot::channel::<Outcome<Option<Widget>, ApiError>>();
        let handle = client.spawn_optional::<Widget, _>(request(), move |outcome| {
            let _ = tx.send(outcome);
        });

        handle.abort();
        check!(handle.await.is_err_and(|err| err.is_cancelled()));
        check!(rx.await.is_err());
    }
}
