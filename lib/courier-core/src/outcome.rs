//! Three-way dispatch outcome.

use crate::Error;

/// The resolution of one dispatched request.
///
/// - [`Success`](Outcome::Success): the status was acceptable and the body decoded (or no body
///   was expected).
/// - [`Failure`](Outcome::Failure): the status was unacceptable and the body decoded as the
///   application error type `E`.
/// - [`SystemFailure`](Outcome::SystemFailure): no response, an undecodable body, or a client
///   setup defect.
#[derive(Debug)]
#[must_use]
pub enum Outcome<T, E> {
    /// Decoded success value.
    Success(T),
    /// Application-level failure decoded from the response body.
    Failure {
        /// HTTP status code of the response.
        status: u16,
        /// Decoded application error.
        error: E,
    },
    /// Transport, decode or configuration failure.
    SystemFailure(Error),
}

impl<T, E> Outcome<T, E> {
    /// Returns `true` for [`Outcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for [`Outcome::Failure`].
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Returns `true` for [`Outcome::SystemFailure`].
    #[must_use]
    pub const fn is_system_failure(&self) -> bool {
        matches!(self, Self::SystemFailure(_))
    }

    /// The response status of an application failure.
    #[must_use]
    pub const fn failure_status(&self) -> Option<u16> {
        match self {
            Self::Failure { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Maps the success value, leaving failures untouched.
    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Failure { status, error } => Outcome::Failure { status, error },
            Self::SystemFailure(error) => Outcome::SystemFailure(error),
        }
    }

    /// Chains a fallible step on the success value.
    pub fn and_then<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        match self {
            Self::Success(value) => f(value),
            Self::Failure { status, error } => Outcome::Failure { status, error },
            Self::SystemFailure(error) => Outcome::SystemFailure(error),
        }
    }

    /// The success value, discarding failures.
    #[must_use]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }
}
