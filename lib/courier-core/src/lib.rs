//! Core types for the courier REST client.
//!
//! This crate provides the I/O-free building blocks of a dispatch:
//! - [`Request`] and [`RequestBuilder`] - outbound request descriptor
//! - [`Response`] - transport-provided response descriptor
//! - [`ContentType`] - normalized media type used as decoder key
//! - [`Decoder`] and [`DecoderRegistry`] - content-type driven body decoding
//! - [`StatusValidator`] - acceptable status range
//! - [`Outcome`] - success / application failure / system failure
//! - [`Error`] and [`Result`] - error handling
//! - [`HttpClient`] - transport trait
//! - [`Method`], [`StatusCode`] and [`header`] (re-exported from `http` crate)

mod client;
mod content_type;
mod decoder;
mod error;
mod outcome;
pub mod prelude;
mod request;
mod response;
mod validator;

pub use client::HttpClient;
pub use content_type::ContentType;
pub use decoder::{Decoder, DecoderRegistry, FormDecoder, JsonDecoder, TextDecoder, decode};
pub use error::{Error, Result};
pub use outcome::Outcome;
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use validator::{StatusValidator, UnacceptableStatus};

// Re-export http crate types for methods, status codes and headers
pub use http::{HeaderMap, Method, StatusCode, header};
