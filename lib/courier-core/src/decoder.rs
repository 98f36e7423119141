//! Body decoders and the content-type keyed [`DecoderRegistry`].
//!
//! A [`Decoder`] turns raw bytes into a [`serde_json::Value`] tree; [`decode`] then
//! deserializes the tree into the caller's type with path-aware errors. Going through a
//! value tree keeps the trait object-safe so decoders can be stored by content type.
//!
//! # Example
//!
//! ```
//! use courier_core::{ContentType, DecoderRegistry, decode};
//! use serde::Deserialize;
//!
//! #[derive(Debug, PartialEq, Deserialize)]
//! struct Widget { id: u64, name: String }
//!
//! let registry = DecoderRegistry::default();
//! let decoder = registry.lookup(&ContentType::json()).expect("json decoder");
//! let widget: Widget = decode(decoder, br#"{"id":1,"name":"a"}"#).expect("decode");
//! assert_eq!(widget, Widget { id: 1, name: "a".to_string() });
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{ContentType, Error, Result};

/// A body decoder for one content type.
///
/// Implementations must be pure: the same bytes always produce the same value or error.
pub trait Decoder: Send + Sync + 'static {
    /// Content type reported in decode errors.
    fn content_type(&self) -> &str;

    /// Parse `body` into a value tree.
    fn decode_value(&self, body: &[u8]) -> Result<Value>;
}

/// Decode `body` into `T` with the given decoder.
///
/// Errors carry the path of the field that failed (e.g. `user.address.city`).
pub fn decode<T: DeserializeOwned>(decoder: &dyn Decoder, body: &[u8]) -> Result<T> {
    let value = decoder.decode_value(body)?;
    serde_path_to_error::deserialize(value).map_err(|e| {
        Error::decode(
            decoder.content_type(),
            e.path().to_string(),
            e.inner().to_string(),
        )
    })
}

/// `application/json` decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn content_type(&self) -> &str {
        ContentType::JSON
    }

    fn decode_value(&self, body: &[u8]) -> Result<Value> {
        serde_json::from_slice(body)
            .map_err(|e| Error::decode(ContentType::JSON, ".", e.to_string()))
    }
}

/// `application/x-www-form-urlencoded` decoder.
///
/// Every field decodes as a string; a repeated key becomes an array of strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormDecoder;

impl Decoder for FormDecoder {
    fn content_type(&self) -> &str {
        ContentType::FORM_URL_ENCODED
    }

    fn decode_value(&self, body: &[u8]) -> Result<Value> {
        let pairs: Vec<(String, String)> = serde_html_form::from_bytes(body)
            .map_err(|e| Error::decode(ContentType::FORM_URL_ENCODED, ".", e.to_string()))?;

        let mut fields = Map::new();
        for (name, value) in pairs {
            match fields.get_mut(&name) {
                Some(Value::Array(values)) => values.push(Value::String(value)),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, Value::String(value)]);
                }
                None => {
                    fields.insert(name, Value::String(value));
                }
            }
        }
        Ok(Value::Object(fields))
    }
}

/// `text/plain` decoder: the whole body as one UTF-8 string.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDecoder;

impl Decoder for TextDecoder {
    fn content_type(&self) -> &str {
        ContentType::PLAIN_TEXT
    }

    fn decode_value(&self, body: &[u8]) -> Result<Value> {
        std::str::from_utf8(body)
            .map(|text| Value::String(text.to_string()))
            .map_err(|e| Error::decode(ContentType::PLAIN_TEXT, ".", e.to_string()))
    }
}

/// Decoders keyed by content type.
///
/// Registering a second decoder for the same content type replaces the first one.
/// The registry is meant to be built once and then shared read-only (the dispatcher keeps it
/// behind an [`Arc`]).
#[derive(Clone)]
pub struct DecoderRegistry {
    decoders: HashMap<ContentType, Arc<dyn Decoder>>,
}

impl DecoderRegistry {
    /// An empty registry: every response with a content type is a missing decoder.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Register `decoder` for `content_type`.
    ///
    /// Returns the decoder previously registered for that content type, if any.
    pub fn register(
        &mut self,
        content_type: ContentType,
        decoder: impl Decoder,
    ) -> Option<Arc<dyn Decoder>> {
        self.decoders.insert(content_type, Arc::new(decoder))
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, content_type: ContentType, decoder: impl Decoder) -> Self {
        self.register(content_type, decoder);
        self
    }

    /// The decoder registered for `content_type`.
    #[must_use]
    pub fn lookup(&self, content_type: &ContentType) -> Option<&dyn Decoder> {
        self.decoders.get(content_type).map(|decoder| decoder.as_ref())
    }

    /// Number of registered content types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    /// Returns `true` if no decoder is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

/// JSON, form and plain text decoders.
impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::empty()
            .with(ContentType::json(), JsonDecoder)
            .with(ContentType::form_url_encoded(), FormDecoder)
            .with(ContentType::plain_text(), TextDecoder)
    }
}

impl fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut content_types: Vec<_> = self.decoders.keys().map(ContentType::as_str).collect();
        content_types.sort_unstable();
        f.debug_struct("DecoderRegistry")
            .field("content_types", &content_types)
            .finish()
    }
}
