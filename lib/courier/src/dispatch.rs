//! Response classification.
//!
//! [`resolve`] turns one transport result into exactly one [`Outcome`]:
//!
//! | transport result                        | outcome                          |
//! |-----------------------------------------|----------------------------------|
//! | error                                   | `SystemFailure(error)`           |
//! | no `Content-Type`                       | `Success(None)`                  |
//! | `Content-Type` without decoder          | `SystemFailure(MissingDecoder)`  |
//! | no body                                 | `Success(None)`                  |
//! | acceptable status, body decodes as `T`  | `Success(Some(value))`           |
//! | unacceptable status, body decodes as `E`| `Failure { status, error }`      |
//! | body does not decode                    | `SystemFailure(Decode)`          |

use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::{DecoderRegistry, Error, Outcome, Response, Result, StatusValidator, decode};

/// Classify a transport result.
///
/// The decoder is chosen from the response content type and used for both the success body
/// (`T`) and the application error body (`E`).
pub fn resolve<T, E>(
    result: Result<Response>,
    decoders: &DecoderRegistry,
    validator: &StatusValidator,
) -> Outcome<Option<T>, E>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            debug!(error = %err, "no response");
            return Outcome::SystemFailure(err);
        }
    };

    let status = response.status();
    let Some(content_type) = response.content_type() else {
        debug!(status, "no content type, nothing to decode");
        return Outcome::Success(None);
    };

    let Some(decoder) = decoders.lookup(&content_type) else {
        error!(%content_type, status, "no decoder registered for response content type");
        return Outcome::SystemFailure(Error::missing_decoder(content_type.as_str()));
    };

    let Some(body) = response.body() else {
        debug!(status, %content_type, "no body");
        return Outcome::Success(None);
    };

    match validator.validate(&response) {
        Ok(()) => match decode::<T>(decoder, body) {
            Ok(value) => Outcome::Success(Some(value)),
            Err(err) => {
                debug!(status, error = %err, "cannot decode success body");
                Outcome::SystemFailure(err)
            }
        },
        Err(unacceptable) => match decode::<E>(decoder, body) {
            Ok(error) => {
                debug!(status = unacceptable.status, "application failure");
                Outcome::Failure {
                    status: unacceptable.status,
                    error,
                }
            }
            Err(err) => {
                debug!(status = unacceptable.status, error = %err, "cannot decode error body");
                Outcome::SystemFailure(err)
            }
        },
    }
}

/// Require a value from an optional-capable outcome.
///
/// `Success(None)` becomes `SystemFailure(Error::EmptyBody)`: the caller expected a `T` but the
/// server sent nothing to decode.
pub fn require<T, E>(outcome: Outcome<Option<T>, E>) -> Outcome<T, E> {
    outcome.and_then(|value| match value {
        Some(value) => Outcome::Success(value),
        None => Outcome::SystemFailure(Error::EmptyBody {
            expected: std::any::type_name::<T>(),
        }),
    })
}
