//! Prelude module for convenient imports.
//!
//! ```ignore
//! use courier_core::prelude::*;
//! ```

pub use crate::{
    ContentType, Decoder, DecoderRegistry, Error, HttpClient, Method, Outcome, Request,
    RequestBuilder, Response, Result, StatusValidator,
};
