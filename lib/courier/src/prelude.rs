//! Prelude module for convenient imports.
//!
//! ```ignore
//! use courier::prelude::*;
//! ```

pub use crate::blocking::{BlockingClient, BlockingError, CancelHandle};
pub use crate::{
    ClientConfig, ContentType, DecoderRegistry, Error, HttpClient, HyperClient, LogLevel, Method,
    Outcome, Request, RequestBuilder, Response, RestClient, RestConfig, Result, StatusCode, header,
};
pub use serde::{Deserialize, Serialize};
