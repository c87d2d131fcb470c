//! Core types shared by the ARB reader, the PO catalog and both conversion
//! directions.

use std::fmt::Display;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single ARB message: the raw ICU string plus its `@key` attribute record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Message {
    /// The raw ICU MessageFormat value.
    pub value: String,

    /// Attributes from the matching `@key` record, if the document has one.
    pub attributes: Option<Attributes>,
}

impl Message {
    pub fn new(value: impl Into<String>) -> Self {
        Message {
            value: value.into(),
            attributes: None,
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.attributes
            .as_ref()
            .and_then(|attributes| attributes.description.as_deref())
    }

    /// Declared placeholders in document order. Empty when the message has no
    /// attribute record or the record declares none.
    pub fn placeholders(&self) -> impl Iterator<Item = (&str, &Placeholder)> {
        self.attributes
            .iter()
            .flat_map(|attributes| attributes.placeholders.iter())
            .map(|(name, placeholder)| (name.as_str(), placeholder))
    }

    pub fn placeholder_names(&self) -> Vec<&str> {
        self.placeholders().map(|(name, _)| name).collect()
    }

    pub fn has_placeholders(&self) -> bool {
        self.placeholders().next().is_some()
    }
}

/// The `@key` attribute record of an ARB message.
///
/// Only `description` and `placeholders` take part in conversion; any other
/// field (`type`, `context`, ...) is kept in `extra` so documents survive a
/// read/write cycle.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Placeholder metadata keyed by name. Order matters: the position of a
    /// name here is the number of its `%N$s` marker in the catalog.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub placeholders: IndexMap<String, Placeholder>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attributes {
    /// Attribute record that declares the given placeholders with empty metadata.
    pub fn from_placeholder_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Attributes {
            placeholders: names
                .into_iter()
                .map(|name| (name.to_string(), Placeholder::default()))
                .collect(),
            ..Default::default()
        }
    }
}

/// Metadata of one declared placeholder.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Placeholder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Placeholder {
    /// The example rendered as text. Non-string examples (numbers, booleans)
    /// use their JSON representation.
    pub fn example_text(&self) -> Option<String> {
        match &self.example {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

/// One of the four plural slots of the catalog model.
///
/// The catalog header maps a count onto these with
/// `n == 0 ? 0 : n == 1 ? 1 : n == 2 ? 2 : 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PluralSlot {
    Zero,
    One,
    Two,
    Other,
}

impl PluralSlot {
    pub const ALL: [PluralSlot; 4] = [
        PluralSlot::Zero,
        PluralSlot::One,
        PluralSlot::Two,
        PluralSlot::Other,
    ];

    /// Position of this slot in `msgstr[N]`.
    pub fn index(self) -> usize {
        match self {
            PluralSlot::Zero => 0,
            PluralSlot::One => 1,
            PluralSlot::Two => 2,
            PluralSlot::Other => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        PluralSlot::ALL.get(index).copied()
    }

    /// ICU exact-value selector (`=0`, `=1`, `=2`). `other` has none.
    pub fn exact_selector(self) -> Option<&'static str> {
        match self {
            PluralSlot::Zero => Some("=0"),
            PluralSlot::One => Some("=1"),
            PluralSlot::Two => Some("=2"),
            PluralSlot::Other => None,
        }
    }

    /// ICU category selector (`zero`, `one`, `two`, `other`).
    pub fn category(self) -> &'static str {
        match self {
            PluralSlot::Zero => "zero",
            PluralSlot::One => "one",
            PluralSlot::Two => "two",
            PluralSlot::Other => "other",
        }
    }

    /// Selector written when rebuilding an ICU expression: the exact-value
    /// form where one exists.
    pub fn output_selector(self) -> &'static str {
        self.exact_selector().unwrap_or_else(|| self.category())
    }
}

impl Display for PluralSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.category())
    }
}
