//! The conversion pipeline: Read → Decode → Encode → Write.
//!
//! A [`Bridge`] owns one [`Decoder`] and one [`Encoder`] and nothing else, so
//! each call is independent and a bridge can be shared between threads as
//! long as its collaborators can.
//!
//! # Failure behavior
//!
//! - The input is read to exhaustion before decoding starts.
//! - The encoded document is built in memory. A decode or encode failure
//!   therefore writes **zero bytes** to the output.
//! - The document is written with a single `write_all` and then flushed. If
//!   that write fails part-way, whatever reached the output is invalid and the
//!   caller must discard it.
//! - Nothing is retried, skipped or defaulted; the first error is returned
//!   tagged with its [`Stage`].

use crate::decoder::{Decoder, YamlDecoder};
use crate::encoder::{Encoder, JsonEncoder};
use crate::error::{BridgeError, Result, Stage};
use crate::format::Format;
use std::io::{Read, Write};
use tracing::debug;

/// Converts one document from the decoder's format to the encoder's format.
#[derive(Debug, Clone, Default)]
pub struct Bridge<D = YamlDecoder, E = JsonEncoder> {
    decoder: D,
    encoder: E,
}

impl Bridge {
    /// YAML in, compact JSON out.
    pub fn yaml_to_json() -> Self {
        Self::default()
    }
}

impl<D: Decoder, E: Encoder> Bridge<D, E> {
    pub fn new(decoder: D, encoder: E) -> Self {
        Self { decoder, encoder }
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn source_format(&self) -> Format {
        self.decoder.format()
    }

    pub fn target_format(&self) -> Format {
        self.encoder.format()
    }

    /// Read all of `input`, convert it, and write the result to `output`.
    pub fn convert<R: Read, W: Write>(&self, mut input: R, mut output: W) -> Result<()> {
        let mut buffer = Vec::new();
        input
            .read_to_end(&mut buffer)
            .map_err(|source| BridgeError::Io {
                stage: Stage::Read,
                source,
            })?;
        debug!(bytes = buffer.len(), "read input");

        let encoded = self.convert_slice(&buffer)?;

        output
            .write_all(&encoded)
            .and_then(|()| output.flush())
            .map_err(|source| BridgeError::Io {
                stage: Stage::Write,
                source,
            })?;
        debug!(bytes = encoded.len(), "wrote output");
        Ok(())
    }

    /// Decode and re-encode an in-memory document.
    pub fn convert_slice(&self, input: &[u8]) -> Result<Vec<u8>> {
        let value = self.decoder.decode(input)?;
        debug!(format = %self.source_format(), root = value.kind(), "decoded document");

        let mut encoded = Vec::new();
        self.encoder.encode(&value, &mut encoded)?;
        debug!(format = %self.target_format(), bytes = encoded.len(), "encoded document");
        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::JsonDecoder;
    use crate::encoder::YamlEncoder;

    #[test]
    fn default_bridge_is_yaml_to_json() {
        let bridge = Bridge::yaml_to_json();
        assert_eq!(bridge.source_format(), Format::Yaml);
        assert_eq!(bridge.target_format(), Format::Json);
    }

    #[test]
    fn custom_collaborators_report_formats() {
        let bridge = Bridge::new(JsonDecoder::new(), YamlEncoder::new());
        assert_eq!(bridge.source_format(), Format::Json);
        assert_eq!(bridge.target_format(), Format::Yaml);
    }

    #[test]
    fn bridge_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Bridge>();
        assert_send_sync::<Bridge<JsonDecoder, YamlEncoder>>();
    }
}
