//! Encoders — a [`Value`] tree into target-format bytes.
//!
//! The JSON encoder walks the tree once, checking every node against what JSON
//! can hold before anything is serialized:
//!
//! - **Mapping keys** must be strings unless [`KeyPolicy::Stringify`] is set,
//!   in which case scalar keys are written as their JSON text (`1`, `true`,
//!   `null`). Sequence and mapping keys are always rejected.
//! - **Numbers** must be finite.
//! - **Key order** follows the mapping's insertion order. When stringified
//!   keys collide the last entry wins, as it would in a JSON object.
//!
//! Errors name the offending node with a JSONPath-style locator such as
//! `$.servers[2].ports`.
//!
//! # Example
//! ```
//! use yaml2json_core::encoder::{Encoder, JsonEncoder};
//! use yaml2json_core::Value;
//!
//! let value = Value::mapping([("key", "value")]);
//! let mut out = Vec::new();
//! JsonEncoder::new().encode(&value, &mut out).unwrap();
//! assert_eq!(out, b"{\"key\":\"value\"}\n");
//! ```

use crate::error::EncodeError;
use crate::format::Format;
use crate::value::{Number, Value};
use serde_json::Map;
use std::fmt;
use std::io::Write;

/// Writes a [`Value`] as one complete target-format document.
pub trait Encoder {
    /// Format this encoder produces.
    fn format(&self) -> Format;

    /// Encode `value` into `out`. Write failures surface as [`EncodeError::Io`].
    fn encode(&self, value: &Value, out: &mut dyn Write) -> Result<(), EncodeError>;
}

impl<E: Encoder + ?Sized> Encoder for &E {
    fn format(&self) -> Format {
        (**self).format()
    }

    fn encode(&self, value: &Value, out: &mut dyn Write) -> Result<(), EncodeError> {
        (**self).encode(value, out)
    }
}

impl<E: Encoder + ?Sized> Encoder for Box<E> {
    fn format(&self) -> Format {
        (**self).format()
    }

    fn encode(&self, value: &Value, out: &mut dyn Write) -> Result<(), EncodeError> {
        (**self).encode(value, out)
    }
}

/// How the JSON encoder treats mapping keys that are not strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPolicy {
    /// Any non-string key is an [`EncodeError::NonStringKey`].
    #[default]
    Strict,
    /// Null, boolean and number keys are written as their JSON text.
    Stringify,
}

/// JSON encoder backed by `serde_json`.
///
/// Output is compact unless [`pretty`](JsonEncoder::pretty) is set, and every
/// document ends with a single newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder {
    pretty: bool,
    key_policy: KeyPolicy,
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent output with two spaces.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn key_policy(mut self, policy: KeyPolicy) -> Self {
        self.key_policy = policy;
        self
    }

    /// Convert to a `serde_json::Value`, applying the same checks as [`Encoder::encode`].
    pub fn to_json(&self, value: &Value) -> Result<serde_json::Value, EncodeError> {
        let mut path = JsonPath::default();
        self.convert(value, &mut path)
    }

    fn convert(&self, value: &Value, path: &mut JsonPath) -> Result<serde_json::Value, EncodeError> {
        Ok(match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => {
                let number = json_number(*n).ok_or_else(|| EncodeError::NonFiniteNumber {
                    path: path.to_string(),
                })?;
                serde_json::Value::Number(number)
            }
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Sequence(items) => {
                let mut array = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    path.push(Segment::Index(index));
                    array.push(self.convert(item, path)?);
                    path.pop();
                }
                serde_json::Value::Array(array)
            }
            Value::Mapping(mapping) => {
                let mut object = Map::with_capacity(mapping.len());
                for (key, item) in mapping {
                    let key = self.object_key(key, path)?;
                    path.push(Segment::Key(key.clone()));
                    let item = self.convert(item, path)?;
                    path.pop();
                    object.insert(key, item);
                }
                serde_json::Value::Object(object)
            }
        })
    }

    /// Resolve a mapping key to a JSON object key under the configured policy.
    fn object_key(&self, key: &Value, path: &JsonPath) -> Result<String, EncodeError> {
        let non_string = || EncodeError::NonStringKey {
            path: path.to_string(),
            kind: key.kind(),
        };
        match (key, self.key_policy) {
            (Value::String(s), _) => Ok(s.clone()),
            (_, KeyPolicy::Strict) => Err(non_string()),
            (Value::Null, KeyPolicy::Stringify) => Ok("null".to_owned()),
            (Value::Bool(b), KeyPolicy::Stringify) => Ok(b.to_string()),
            (Value::Number(n), KeyPolicy::Stringify) => json_number(*n)
                .map(|n| n.to_string())
                .ok_or_else(|| EncodeError::NonFiniteNumber {
                    path: path.to_string(),
                }),
            (Value::Sequence(_) | Value::Mapping(_), KeyPolicy::Stringify) => Err(non_string()),
        }
    }
}

impl Encoder for JsonEncoder {
    fn format(&self) -> Format {
        Format::Json
    }

    fn encode(&self, value: &Value, out: &mut dyn Write) -> Result<(), EncodeError> {
        let json = self.to_json(value)?;
        let written = if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &json)
        } else {
            serde_json::to_writer(&mut *out, &json)
        };
        written.map_err(|err| {
            if err.is_io() {
                EncodeError::Io(err.into())
            } else {
                EncodeError::Serialize {
                    format: Format::Json,
                    message: err.to_string(),
                }
            }
        })?;
        out.write_all(b"\n")?;
        Ok(())
    }
}

fn json_number(n: Number) -> Option<serde_json::Number> {
    match n {
        Number::Int(i) => Some(serde_json::Number::from(i)),
        Number::UInt(u) => Some(serde_json::Number::from(u)),
        Number::Float(f) => serde_json::Number::from_f64(f),
    }
}

/// YAML encoder backed by `serde-saphyr`; used for the JSON → YAML direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlEncoder;

impl YamlEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Encoder for YamlEncoder {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn encode(&self, value: &Value, out: &mut dyn Write) -> Result<(), EncodeError> {
        let text = serde_saphyr::to_string(value).map_err(|err| EncodeError::Serialize {
            format: Format::Yaml,
            message: err.to_string(),
        })?;
        out.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

enum Segment {
    Key(String),
    Index(usize),
}

/// Location of the node being encoded, rendered as `$.a[0]["b c"]`.
#[derive(Default)]
struct JsonPath {
    segments: Vec<Segment>,
}

impl JsonPath {
    fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    fn pop(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                Segment::Index(i) => write!(f, "[{i}]")?,
                Segment::Key(k) if is_plain_key(k) => write!(f, ".{k}")?,
                Segment::Key(k) => write!(f, "[{k:?}]")?,
            }
        }
        Ok(())
    }
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_renders_keys_and_indices() {
        let mut path = JsonPath::default();
        path.push(Segment::Key("servers".into()));
        path.push(Segment::Index(2));
        path.push(Segment::Key("two words".into()));
        assert_eq!(path.to_string(), r#"$.servers[2]["two words"]"#);
    }

    #[test]
    fn root_path() {
        assert_eq!(JsonPath::default().to_string(), "$");
    }

    #[test]
    fn plain_key_rules() {
        assert!(is_plain_key("a_b-c1"));
        assert!(!is_plain_key("1abc"));
        assert!(!is_plain_key(""));
        assert!(!is_plain_key("a.b"));
    }
}
