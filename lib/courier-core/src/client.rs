//! Transport trait.
//!
//! [`HttpClient`] is the seam between the dispatcher and the network. `courier` ships a
//! hyper-based implementation; implement it directly for mocks or custom stacks.

use std::future::Future;

use crate::{Request, Response, Result};

/// Single-shot HTTP transport.
///
/// The returned future resolves exactly once, either with a response or with a transport
/// error (no response at all). Non-2xx statuses are responses, not errors.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid request
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}

impl<C: HttpClient> HttpClient for std::sync::Arc<C> {
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).execute(request)
    }
}
