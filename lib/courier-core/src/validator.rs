//! Response status validation.

use std::ops::RangeInclusive;

use derive_more::{Display, Error};

use crate::Response;

/// The response status is outside the acceptable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("unacceptable status {status}")]
pub struct UnacceptableStatus {
    /// HTTP status code of the response.
    pub status: u16,
}

/// Accepts responses whose status falls in an inclusive range.
///
/// The default range is the success class, `200..=299`.
///
/// ```
/// use courier_core::StatusValidator;
///
/// let validator = StatusValidator::new(200..=399);
/// assert!(validator.accepts(304));
/// assert!(!validator.accepts(404));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusValidator {
    acceptable: RangeInclusive<u16>,
}

impl StatusValidator {
    /// Accept statuses in `acceptable`.
    #[must_use]
    pub const fn new(acceptable: RangeInclusive<u16>) -> Self {
        Self { acceptable }
    }

    /// The acceptable status range.
    #[must_use]
    pub const fn acceptable(&self) -> &RangeInclusive<u16> {
        &self.acceptable
    }

    /// Returns `true` if `status` is acceptable.
    #[must_use]
    pub fn accepts(&self, status: u16) -> bool {
        self.acceptable.contains(&status)
    }

    /// Classify `response`.
    pub fn validate<B>(&self, response: &Response<B>) -> Result<(), UnacceptableStatus> {
        let status = response.status();
        if self.accepts(status) {
            Ok(())
        } else {
            Err(UnacceptableStatus { status })
        }
    }
}

impl Default for StatusValidator {
    fn default() -> Self {
        Self::new(200..=299)
    }
}
