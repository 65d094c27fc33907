//! Decoders — source-format bytes into a [`Value`] tree.
//!
//! The parsers themselves are external crates; this module adapts them to the
//! [`Decoder`] contract:
//!
//! - the whole document is available as one byte slice and is never mutated;
//! - the result is a complete [`Value`] or a [`DecodeError`] carrying the
//!   parser's message and, when known, a line/column [`Location`].
//!
//! # YAML rules
//!
//! - **Empty input** (nothing but whitespace) decodes to [`Value::Null`], the
//!   value of an empty YAML document. Comment-only input follows the same rule
//!   through the parser.
//! - **One document per stream.** A second document is a decode error.
//! - **Duplicate keys** in a mapping are a decode error.
//! - Anchors and aliases are expanded; tags and comments are dropped.
//! - YAML 1.1 boolean forms (`yes`, `no`, `on`, `off`, `y`, `n`) decode as
//!   booleans unless [`YamlDecoder::strict_booleans`] is set.
//! - `.inf`/`.nan` come back from the parser as strings, not numbers.

use crate::error::{DecodeError, Location};
use crate::format::Format;
use crate::value::Value;
use tracing::debug;

/// Turns a complete source document into a [`Value`].
pub trait Decoder {
    /// Format this decoder accepts.
    fn format(&self) -> Format;

    /// Decode one complete document.
    fn decode(&self, input: &[u8]) -> Result<Value, DecodeError>;
}

impl<D: Decoder + ?Sized> Decoder for &D {
    fn format(&self) -> Format {
        (**self).format()
    }

    fn decode(&self, input: &[u8]) -> Result<Value, DecodeError> {
        (**self).decode(input)
    }
}

impl<D: Decoder + ?Sized> Decoder for Box<D> {
    fn format(&self) -> Format {
        (**self).format()
    }

    fn decode(&self, input: &[u8]) -> Result<Value, DecodeError> {
        (**self).decode(input)
    }
}

/// YAML decoder backed by `serde-saphyr`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlDecoder {
    strict_booleans: bool,
}

impl YamlDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept `true`/`false` as booleans. YAML 1.1 forms such as `yes`,
    /// `off` or `on` then decode as strings.
    pub fn strict_booleans(mut self, strict: bool) -> Self {
        self.strict_booleans = strict;
        self
    }

    fn parser_options(&self) -> serde_saphyr::Options {
        serde_saphyr::options! {
            strict_booleans: self.strict_booleans,
        }
    }
}

impl Decoder for YamlDecoder {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn decode(&self, input: &[u8]) -> Result<Value, DecodeError> {
        let text = std::str::from_utf8(input).map_err(|source| DecodeError::InvalidUtf8 {
            format: Format::Yaml,
            source,
        })?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        if text.trim().is_empty() {
            debug!("empty YAML input decodes to null");
            return Ok(Value::Null);
        }

        serde_saphyr::from_str_with_options::<Value>(text, self.parser_options())
            .map_err(yaml_error)
    }
}

fn yaml_error(err: serde_saphyr::Error) -> DecodeError {
    let location = err.location().map(|loc| Location {
        line: loc.line(),
        column: loc.column(),
    });
    DecodeError::Malformed {
        format: Format::Yaml,
        message: err.to_string(),
        location,
    }
}

/// JSON decoder backed by `serde_json`. Empty input is an error: JSON has no
/// empty document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for JsonDecoder {
    fn format(&self) -> Format {
        Format::Json
    }

    fn decode(&self, input: &[u8]) -> Result<Value, DecodeError> {
        serde_json::from_slice::<Value>(input).map_err(|err| {
            // serde_json reports line 0 when it has no position.
            let location = (err.line() > 0).then(|| Location {
                line: err.line() as u64,
                column: err.column() as u64,
            });
            DecodeError::Malformed {
                format: Format::Json,
                message: err.to_string(),
                location,
            }
        })
    }
}
