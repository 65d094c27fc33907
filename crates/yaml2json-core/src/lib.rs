//! # yaml2json-core
//!
//! Whole-document conversion between YAML and JSON through a closed generic
//! value tree.
//!
//! A [`Bridge`] reads an entire input stream, hands the bytes to a
//! [`Decoder`], passes the resulting [`Value`] to an [`Encoder`], and writes
//! the encoded document to the output stream. Each stage either completes or
//! fails the whole conversion with a [`BridgeError`] naming the stage; the
//! bridge never recovers, substitutes defaults, or emits a half-written
//! document after a decode or encode failure.
//!
//! ## Quick start
//!
//! ```rust
//! use yaml2json_core::{json_to_yaml, yaml_to_json, Bridge};
//!
//! // YAML → JSON
//! let json = yaml_to_json("key: value").unwrap();
//! assert_eq!(json, "{\"key\":\"value\"}\n");
//!
//! // Streams: read everything from `input`, write one document to `output`
//! let mut output = Vec::new();
//! Bridge::yaml_to_json()
//!     .convert("- 1\n- 2\n- 3\n".as_bytes(), &mut output)
//!     .unwrap();
//! assert_eq!(output, b"[1,2,3]\n");
//!
//! // Malformed input is a decode error
//! assert!(yaml_to_json("key: [1, 2").is_err());
//! # let _ = json_to_yaml("{}");
//! ```
//!
//! ## Modules
//!
//! - [`value`] — the `Value` tree shared by all formats
//! - [`decoder`] — `Decoder` trait, YAML and JSON decoders
//! - [`encoder`] — `Encoder` trait, JSON and YAML encoders, `KeyPolicy`
//! - [`bridge`] — the Read → Decode → Encode → Write pipeline
//! - [`error`] — stage-tagged error types
//! - [`format`] — the `Format` enum

pub mod bridge;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod format;
pub mod value;

pub use bridge::Bridge;
pub use decoder::{Decoder, JsonDecoder, YamlDecoder};
pub use encoder::{Encoder, JsonEncoder, KeyPolicy, YamlEncoder};
pub use error::{BridgeError, DecodeError, EncodeError, Location, Result, Stage};
pub use format::Format;
pub use value::{Mapping, Number, Value};

/// Convert a YAML document to compact JSON (newline-terminated).
pub fn yaml_to_json(yaml: &str) -> Result<String> {
    convert_str(&Bridge::yaml_to_json(), yaml)
}

/// Convert a JSON document to YAML.
pub fn json_to_yaml(json: &str) -> Result<String> {
    convert_str(&Bridge::new(JsonDecoder::new(), YamlEncoder::new()), json)
}

fn convert_str<D: Decoder, E: Encoder>(bridge: &Bridge<D, E>, input: &str) -> Result<String> {
    let bytes = bridge.convert_slice(input.as_bytes())?;
    String::from_utf8(bytes).map_err(|err| {
        BridgeError::Encode(EncodeError::Serialize {
            format: bridge.target_format(),
            message: err.to_string(),
        })
    })
}
