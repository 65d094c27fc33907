//! Error types for the decode, encode and bridge layers.
//!
//! Leaf errors ([`DecodeError`], [`EncodeError`]) describe what went wrong with
//! the document. [`BridgeError`] wraps them with the pipeline [`Stage`] that
//! failed and keeps the leaf error as its `source()`.

use crate::format::Format;
use std::fmt;
use std::io;
use thiserror::Error;

/// 1-based position inside the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: u64,
    pub column: u64,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The input bytes are not a well-formed document in the source format.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Text formats require UTF-8 input.
    #[error("{format} input is not valid UTF-8")]
    InvalidUtf8 {
        format: Format,
        source: std::str::Utf8Error,
    },

    /// Syntax or structure error reported by the parser. The message is the
    /// parser's own and usually names the position already.
    #[error("malformed {format} document: {message}")]
    Malformed {
        format: Format,
        message: String,
        location: Option<Location>,
    },
}

impl DecodeError {
    pub fn format(&self) -> Format {
        match self {
            DecodeError::InvalidUtf8 { format, .. } | DecodeError::Malformed { format, .. } => {
                *format
            }
        }
    }

    /// Position of the error when the parser reported one.
    pub fn location(&self) -> Option<Location> {
        match self {
            DecodeError::InvalidUtf8 { .. } => None,
            DecodeError::Malformed { location, .. } => *location,
        }
    }
}

/// The value tree cannot be written in the target format.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// JSON object keys must be strings.
    #[error("mapping key at {path} is a {kind}, but JSON object keys must be strings")]
    NonStringKey { path: String, kind: &'static str },

    /// JSON has no NaN or infinity.
    #[error("number at {path} is not finite and has no JSON representation")]
    NonFiniteNumber { path: String },

    /// The underlying serializer rejected the value.
    #[error("{format} serialization failed: {message}")]
    Serialize { format: Format, message: String },

    #[error("failed to write encoded output")]
    Io(#[from] io::Error),
}

/// A step of the Read → Decode → Encode → Write pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Read,
    Decode,
    Encode,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Read => "read",
            Stage::Decode => "decode",
            Stage::Encode => "encode",
            Stage::Write => "write",
        })
    }
}

/// A failed conversion. Every variant is fatal to the conversion.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Reading the input or writing the output stream failed.
    #[error("{stage} stage failed")]
    Io { stage: Stage, source: io::Error },

    #[error("decode stage failed")]
    Decode(#[from] DecodeError),

    #[error("encode stage failed")]
    Encode(#[from] EncodeError),
}

impl BridgeError {
    pub fn stage(&self) -> Stage {
        match self {
            BridgeError::Io { stage, .. } => *stage,
            BridgeError::Decode(_) => Stage::Decode,
            BridgeError::Encode(_) => Stage::Encode,
        }
    }
}

/// Convenience alias used throughout yaml2json-core.
pub type Result<T> = std::result::Result<T, BridgeError>;
