//! Support for Application Resource Bundle (`.arb`) files.
//!
//! An ARB document is a JSON object. Plain keys hold ICU MessageFormat
//! strings, `@key` holds the attribute record of `key`, and `@@key` holds
//! document-wide attributes such as `@@locale`. Key order is preserved on
//! read and write.

use std::io::{BufRead, Write};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    error::Error,
    traits::Parser,
    types::{Attributes, Message},
};

/// Indentation used when none is configured.
pub const DEFAULT_INDENT: usize = 2;

/// Represents one ARB document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Format {
    /// Value of `@@locale`, if present.
    pub locale: Option<String>,
    /// Every other `@@` attribute, with its full key.
    pub globals: Map<String, Value>,
    /// Messages keyed by message key, in document order.
    pub messages: IndexMap<String, Message>,
}

impl Format {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Message> {
        self.messages.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, message: Message) {
        self.messages.insert(key.into(), message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Builds a document from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let raw = match value {
            Value::Object(raw) => raw,
            other => {
                return Err(Error::Structure(format!(
                    "expected a JSON object at the top level, found {}",
                    json_kind(&other)
                )));
            }
        };

        let mut format = Format::new();
        for (key, value) in &raw {
            if let Some(global) = key.strip_prefix("@@") {
                if global == "locale" {
                    let locale = value.as_str().ok_or_else(|| {
                        Error::Structure("`@@locale` must be a string".to_string())
                    })?;
                    format.locale = Some(locale.to_string());
                } else {
                    format.globals.insert(key.clone(), value.clone());
                }
                continue;
            }
            if key.starts_with('@') {
                if !raw.contains_key(&key[1..]) {
                    tracing::debug!(key = %key, "ignoring attribute record without a message");
                }
                continue;
            }

            let Value::String(text) = value else {
                return Err(Error::Structure(format!(
                    "message `{}` must be a string, found {}",
                    key,
                    json_kind(value)
                )));
            };
            let attributes = raw
                .get(&format!("@{}", key))
                .map(|attributes| parse_attributes(key, attributes))
                .transpose()?;

            format.messages.insert(
                key.clone(),
                Message {
                    value: text.clone(),
                    attributes,
                },
            );
        }

        Ok(format)
    }

    /// Converts the document back into a JSON object.
    pub fn to_value(&self) -> Result<Value, Error> {
        let mut raw = Map::new();
        if let Some(locale) = &self.locale {
            raw.insert("@@locale".to_string(), Value::String(locale.clone()));
        }
        for (key, value) in &self.globals {
            raw.insert(key.clone(), value.clone());
        }
        for (key, message) in &self.messages {
            raw.insert(key.clone(), Value::String(message.value.clone()));
            if let Some(attributes) = &message.attributes {
                raw.insert(format!("@{}", key), serde_json::to_value(attributes)?);
            }
        }
        Ok(Value::Object(raw))
    }

    /// Writes the document as pretty JSON indented by `indent` spaces.
    ///
    /// Non-ASCII characters are written as-is.
    pub fn to_writer_with_indent<W: Write>(
        &self,
        mut writer: W,
        indent: usize,
    ) -> Result<(), Error> {
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        self.to_value()?.serialize(&mut serializer)?;
        writer.write_all(b"\n")?;
        writer.flush().map_err(Error::Io)
    }
}

impl Parser for Format {
    /// Parses an ARB document. Empty input yields an empty document.
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let content = content.trim_start_matches('\u{feff}');
        if content.trim().is_empty() {
            return Ok(Format::new());
        }

        let format = Format::from_value(serde_json::from_str(content)?)?;
        tracing::debug!(messages = format.len(), "parsed ARB document");
        Ok(format)
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        self.to_writer_with_indent(writer, DEFAULT_INDENT)
    }
}

fn parse_attributes(key: &str, value: &Value) -> Result<Attributes, Error> {
    if !value.is_object() {
        return Err(Error::Structure(format!(
            "attributes `@{}` must be an object, found {}",
            key,
            json_kind(value)
        )));
    }
    serde_json::from_value(value.clone())
        .map_err(|e| Error::Structure(format!("attributes `@{}` are malformed: {}", key, e)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
