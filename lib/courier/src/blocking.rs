//! Synchronous adapter.
//!
//! [`BlockingClient`] runs each dispatch as a task on its own Tokio runtime and parks the calling
//! thread on a one-shot channel until the task's completion fires.
//!
//! ```ignore
//! use courier::blocking::BlockingClient;
//! use courier::prelude::*;
//!
//! let client: RestClient<_, ApiError> = RestClient::builder(HyperClient::new()).build();
//! let blocking = BlockingClient::new(client)?.with_timeout(Duration::from_secs(5));
//!
//! match blocking.perform::<Widget>(request) {
//!     Ok(Some(widget)) => println!("{widget:?}"),
//!     Ok(None) => println!("cancelled"),
//!     Err(err) => println!("{err}"),
//! }
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::runtime::Runtime;
use tokio::sync::{oneshot, watch};
use tracing::{debug, warn};

use crate::{Error, HttpClient, Outcome, Request, RestClient, Result};

/// Error returned by [`BlockingClient`] calls.
#[derive(Debug)]
pub enum BlockingError<E> {
    /// The server answered with an unacceptable status and a decodable error body.
    Application {
        /// HTTP status code.
        status: u16,
        /// Decoded application error.
        error: E,
    },
    /// Transport, decode, configuration or contract failure.
    System(Error),
}

impl<E> BlockingError<E> {
    /// The HTTP status of an application failure.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Application { status, .. } => Some(*status),
            Self::System(_) => None,
        }
    }

    /// Check if this is a timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::System(Error::Timeout))
    }
}

impl<E: fmt::Debug> fmt::Display for BlockingError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Application { status, error } => {
                write!(f, "application error (HTTP {status}): {error:?}")
            }
            Self::System(err) => write!(f, "{err}"),
        }
    }
}

impl<E: fmt::Debug> std::error::Error for BlockingError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Application { .. } => None,
            Self::System(err) => Some(err),
        }
    }
}

impl<E> From<Error> for BlockingError<E> {
    fn from(err: Error) -> Self {
        Self::System(err)
    }
}

/// Cancels the in-flight and all later calls of one [`BlockingClient`].
///
/// Cancelled calls return `Ok(None)`. Cancellation cannot be undone.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    signal: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Cancel.
    pub fn cancel(&self) {
        self.signal.send_replace(true);
    }

    /// Whether [`cancel`](Self::cancel) was called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.signal.borrow()
    }
}

/// Resolves once `signal` turns true; never resolves if the sender is gone first.
async fn cancelled(mut signal: watch::Receiver<bool>) {
    let closed = signal.wait_for(|cancelled| *cancelled).await.is_err();
    if closed {
        std::future::pending::<()>().await;
    }
}

/// Blocking facade over a [`RestClient`].
///
/// Must not be used from within an asynchronous context: blocking calls drive their own runtime.
pub struct BlockingClient<C, E> {
    client: RestClient<C, E>,
    runtime: Runtime,
    timeout: Option<Duration>,
    cancel: CancelHandle,
}

impl<C: fmt::Debug, E> fmt::Debug for BlockingClient<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingClient")
            .field("client", &self.client)
            .field("timeout", &self.timeout)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl<C, E> BlockingClient<C, E>
where
    C: HttpClient + Clone + 'static,
    E: DeserializeOwned + Send + 'static,
{
    /// Wrap `client`, starting a dedicated runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Runtime`] when the runtime cannot be started.
    pub fn new(client: RestClient<C, E>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("courier-blocking")
            .enable_all()
            .build()?;

        let (signal, _) = watch::channel(false);
        Ok(Self {
            client,
            runtime,
            timeout: None,
            cancel: CancelHandle {
                signal: Arc::new(signal),
            },
        })
    }

    /// Fail calls that take longer than `timeout` with [`Error::Timeout`].
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The configured timeout.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// A handle cancelling this client's calls, usable from another thread.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// The wrapped asynchronous client.
    #[must_use]
    pub const fn client(&self) -> &RestClient<C, E> {
        &self.client
    }

    /// Dispatch `request` and block until it resolves, requiring a value.
    ///
    /// Returns `Ok(None)` only when the call was cancelled.
    ///
    /// # Errors
    ///
    /// [`BlockingError::Application`] for an unacceptable status with a decoded error body,
    /// [`BlockingError::System`] for everything else that went wrong.
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous runtime.
    pub fn perform<T>(&self, request: Request) -> std::result::Result<Option<T>, BlockingError<E>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let task = self.client.task::<T, _>(request, move |outcome| {
            let _ = tx.send(outcome);
        });

        self.wait(task, rx)?.map(Self::collapse).transpose()
    }

    /// Dispatch `request` and block until it resolves, allowing an empty success.
    ///
    /// Returns `Ok(None)` for an empty body or a cancelled call.
    ///
    /// # Errors
    ///
    /// Same as [`perform`](Self::perform).
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous runtime.
    pub fn perform_optional<T>(
        &self,
        request: Request,
    ) -> std::result::Result<Option<T>, BlockingError<E>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let task = self.client.task_optional::<T, _>(request, move |outcome| {
            let _ = tx.send(outcome);
        });

        self.wait(task, rx)?
            .map(Self::collapse)
            .transpose()
            .map(Option::flatten)
    }

    /// Run `task` on the runtime and park until its completion fires.
    ///
    /// `None` means the task ended without completing.
    fn wait<O>(
        &self,
        task: impl std::future::Future<Output = ()> + Send + 'static,
        rx: oneshot::Receiver<O>,
    ) -> Result<Option<O>> {
        let signal = self.cancel.signal.subscribe();
        if *signal.borrow() {
            debug!("client cancelled, request not sent");
            return Ok(None);
        }

        let handle = self.runtime.spawn(async move {
            tokio::select! {
                () = task => {}
                () = cancelled(signal) => debug!("request cancelled"),
            }
        });

        let received = match self.timeout {
            Some(timeout) => {
                let received = self
                    .runtime
                    .block_on(async { tokio::time::timeout(timeout, rx).await });
                if received.is_err() {
                    handle.abort();
                    debug!(?timeout, "request timed out");
                    return Err(Error::Timeout);
                }
                received.ok()
            }
            None => Some(self.runtime.block_on(rx)),
        };

        Ok(received.and_then(std::result::Result::ok))
    }

    fn collapse<T>(outcome: Outcome<T, E>) -> std::result::Result<T, BlockingError<E>> {
        match outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure { status, error } => {
                warn!(status, "request failed with application error");
                Err(BlockingError::Application { status, error })
            }
            Outcome::SystemFailure(err) => Err(BlockingError::System(err)),
        }
    }
}
