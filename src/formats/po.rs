//! Support for gettext PO catalogs as produced and consumed by arbpo.
//!
//! Every message is an entry keyed by `msgctxt` (the ARB key). Singular
//! messages use `msgid`/`msgstr`; plural messages use `msgid`,
//! `msgid_plural` and the four slots `msgstr[0]`..`msgstr[3]` (zero, one,
//! two, other). Parameter names travel in `#. Parameter N: name` comments.
//!
//! Only the subset of PO needed for that round trip is modelled. Other
//! comment kinds (`#:`, `#|`, translator comments) are skipped on read.

use std::{
    fmt::Display,
    io::{BufRead, Write},
};

use indexmap::IndexMap;
use indoc::indoc;
use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    escape::{escape_literal, quote, unescape_literal},
    traits::Parser,
    types::PluralSlot,
};

/// Header value mapping a count onto the four plural slots.
pub const PLURAL_FORMS_HEADER: &str =
    "Plural-Forms: nplurals=4; plural=n == 0 ? 0 : n == 1 ? 1 : n == 2 ? 2 : 3;";

/// Suffix after the closing quote of `msgctxt` marking a plural entry.
pub const PLURAL_CONTEXT_MARKER: char = '!';

lazy_static! {
    static ref PARAMETER_REGEX: Regex =
        Regex::new(r"^#\. Parameter ([0-9]+): ([^ \r\n]+).*$").unwrap();
}

/// A comment line attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comment {
    /// `#. text`, a note for translators.
    Extracted(String),
    /// `#, flags`, e.g. `c-format`.
    Flag(String),
}

impl Display for Comment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comment::Extracted(text) => write!(f, "#. {}", text),
            Comment::Flag(flags) => write!(f, "#, {}", flags),
        }
    }
}

/// The translated side of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// `msgstr`.
    Singular(String),
    /// `msgid_plural` and `msgstr[0]`..`msgstr[3]`.
    Plural {
        id_plural: String,
        translations: [String; 4],
    },
}

impl Translation {
    /// True when no translated text is present at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Translation::Singular(text) => text.is_empty(),
            Translation::Plural { translations, .. } => translations.iter().all(String::is_empty),
        }
    }

    /// Text of one plural slot; `None` for singular translations.
    pub fn slot(&self, slot: PluralSlot) -> Option<&str> {
        match self {
            Translation::Singular(_) => None,
            Translation::Plural { translations, .. } => Some(translations[slot.index()].as_str()),
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub comments: Vec<Comment>,
    /// `msgctxt`, holding the ARB key.
    pub context: Option<String>,
    /// Whether the `msgctxt` line carries the trailing `!` plural marker.
    pub plural_context: bool,
    /// `msgid`, the source text.
    pub id: String,
    pub translation: Translation,
    /// Marker position (as written, 1-based) to placeholder name.
    pub parameters: IndexMap<String, String>,
}

impl Entry {
    pub fn is_plural(&self) -> bool {
        matches!(self.translation, Translation::Plural { .. })
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.comments.iter().any(|comment| match comment {
            Comment::Flag(flags) => flags.split(',').any(|f| f.trim() == flag),
            Comment::Extracted(_) => false,
        })
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for comment in &self.comments {
            writeln!(f, "{}", comment)?;
        }
        if let Some(context) = &self.context {
            write!(f, "msgctxt {}", quote(&escape_literal(context)))?;
            if self.plural_context {
                write!(f, "{}", PLURAL_CONTEXT_MARKER)?;
            }
            writeln!(f)?;
        }
        write!(f, "msgid {}", quote(&escape_literal(&self.id)))?;
        match &self.translation {
            Translation::Singular(text) => {
                write!(f, "\nmsgstr {}", quote(&escape_literal(text)))?;
            }
            Translation::Plural {
                id_plural,
                translations,
            } => {
                write!(f, "\nmsgid_plural {}", quote(&escape_literal(id_plural)))?;
                for (index, text) in translations.iter().enumerate() {
                    write!(f, "\nmsgstr[{}] {}", index, quote(&escape_literal(text)))?;
                }
            }
        }
        Ok(())
    }
}

/// A PO catalog: the header value plus all message entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    /// `msgstr` of the leading entry with an empty `msgid`, if any.
    pub header: Option<String>,
    pub entries: Vec<Entry>,
}

impl Parser for Format {
    /// Parses a catalog. Lines that cannot be decoded are skipped.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut tokenizer = Tokenizer::default();
        for (number, line) in reader.lines().enumerate() {
            tokenizer.feed(number + 1, &line?);
        }
        let mut entries = tokenizer.finish();

        let header = match entries.first() {
            Some(Entry {
                id,
                context: None,
                translation: Translation::Singular(text),
                ..
            }) if id.is_empty() => Some(text.clone()),
            _ => None,
        };
        if header.is_some() {
            entries.remove(0);
        }

        tracing::debug!(entries = entries.len(), "parsed PO catalog");
        Ok(Format { header, entries })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut content = String::new();

        if let Some(header) = &self.header {
            let header = format!(
                indoc! {r#"
                msgid ""
                msgstr ""
                "{}"
                "#},
                escape_literal(header)
            );
            content.push_str(&header);
        }

        for entry in &self.entries {
            if !content.is_empty() {
                content.push('\n');
            }
            content.push_str(&entry.to_string());
            content.push('\n');
        }

        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Context,
    Id,
    IdPlural,
    Str,
    Slot(usize),
}

/// Line-oriented state machine that groups catalog lines into entries.
///
/// A block is complete after `msgstr` or `msgstr[N]`; the next line that is
/// neither a continuation nor another `msgstr[N]` starts a new block. A
/// `msgctxt` also starts a new block once the current one holds a keyword.
#[derive(Debug, Default)]
struct Tokenizer {
    block: Block,
    entries: Vec<Entry>,
}

#[derive(Debug, Default)]
struct Block {
    comments: Vec<Comment>,
    parameters: IndexMap<String, String>,
    context: Option<String>,
    plural_context: bool,
    id: Option<String>,
    id_plural: Option<String>,
    translation: Option<String>,
    slots: [Option<String>; 4],
    active: Option<Field>,
    has_keyword: bool,
    complete: bool,
}

impl Tokenizer {
    fn feed(&mut self, number: usize, line: &str) {
        let line = line.trim();

        if line.starts_with('"') {
            match unescape_literal(line) {
                Some(text) => self.block.append(&text),
                None => tracing::warn!(line = number, "skipping undecodable continuation line"),
            }
            return;
        }

        if let Some((field, payload)) = split_keyword(line) {
            let continues_plural = matches!(field, Field::Slot(_));
            if (self.block.complete && !continues_plural)
                || (field == Field::Context && self.block.has_keyword)
            {
                self.flush();
            }
            if !self.block.set(field, payload) {
                tracing::warn!(line = number, "skipping undecodable `{}`", line);
            }
            return;
        }

        if self.block.complete {
            self.flush();
        }
        if line.starts_with('#') {
            self.block.comment(line);
        } else if !line.is_empty() {
            tracing::warn!(line = number, "ignoring unrecognized line");
        }
    }

    fn flush(&mut self) {
        let block = std::mem::take(&mut self.block);
        if let Some(entry) = block.into_entry() {
            self.entries.push(entry);
        }
    }

    fn finish(mut self) -> Vec<Entry> {
        self.flush();
        self.entries
    }
}

impl Block {
    /// Records a keyword line. Returns false if its payload does not decode.
    fn set(&mut self, field: Field, payload: &str) -> bool {
        let payload = if field == Field::Context {
            match payload.trim_end().strip_suffix(PLURAL_CONTEXT_MARKER) {
                Some(stripped) => {
                    self.plural_context = true;
                    stripped
                }
                None => payload,
            }
        } else {
            payload
        };
        let Some(text) = unescape_literal(payload) else {
            return false;
        };

        match field {
            Field::Context => self.context = Some(text),
            Field::Id => self.id = Some(text),
            Field::IdPlural => self.id_plural = Some(text),
            Field::Str => {
                self.translation = Some(text);
                self.complete = true;
            }
            Field::Slot(index) => {
                if let Some(slot) = self.slots.get_mut(index) {
                    *slot = Some(text);
                } else {
                    tracing::warn!(index, "ignoring plural slot beyond the four supported");
                }
                self.complete = true;
            }
        }
        self.active = Some(field);
        self.has_keyword = true;
        true
    }

    fn append(&mut self, text: &str) {
        let target = match self.active {
            Some(Field::Context) => self.context.as_mut(),
            Some(Field::Id) => self.id.as_mut(),
            Some(Field::IdPlural) => self.id_plural.as_mut(),
            Some(Field::Str) => self.translation.as_mut(),
            Some(Field::Slot(index)) => self.slots.get_mut(index).and_then(Option::as_mut),
            None => None,
        };
        match target {
            Some(value) => value.push_str(text),
            None => tracing::warn!("ignoring continuation line outside of a value"),
        }
    }

    fn comment(&mut self, line: &str) {
        if let Some(captures) = PARAMETER_REGEX.captures(line) {
            self.parameters
                .insert(captures[1].to_string(), captures[2].to_string());
        }
        if let Some(text) = line.strip_prefix("#.") {
            self.comments
                .push(Comment::Extracted(strip_one_space(text).to_string()));
        } else if let Some(flags) = line.strip_prefix("#,") {
            self.comments.push(Comment::Flag(flags.trim().to_string()));
        }
    }

    fn into_entry(self) -> Option<Entry> {
        if !self.has_keyword {
            return None;
        }

        let is_plural = self.id_plural.is_some() || self.slots.iter().any(Option::is_some);
        let translation = if is_plural {
            let [zero, one, two, other] = self.slots;
            Translation::Plural {
                id_plural: self.id_plural.unwrap_or_default(),
                translations: [
                    zero.unwrap_or_default(),
                    one.unwrap_or_default(),
                    two.unwrap_or_default(),
                    other.unwrap_or_default(),
                ],
            }
        } else {
            Translation::Singular(self.translation.unwrap_or_default())
        };

        Some(Entry {
            comments: self.comments,
            context: self.context,
            plural_context: self.plural_context,
            id: self.id.unwrap_or_default(),
            translation,
            parameters: self.parameters,
        })
    }
}

fn split_keyword(line: &str) -> Option<(Field, &str)> {
    if let Some(rest) = line.strip_prefix("msgctxt ") {
        return Some((Field::Context, rest));
    }
    if let Some(rest) = line.strip_prefix("msgid_plural ") {
        return Some((Field::IdPlural, rest));
    }
    if let Some(rest) = line.strip_prefix("msgid ") {
        return Some((Field::Id, rest));
    }
    if let Some(rest) = line.strip_prefix("msgstr ") {
        return Some((Field::Str, rest));
    }
    let rest = line.strip_prefix("msgstr[")?;
    let close = rest.find(']')?;
    let index = rest[..close].parse().ok()?;
    Some((Field::Slot(index), &rest[close + 1..]))
}

fn strip_one_space(text: &str) -> &str {
    text.strip_prefix(' ').unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_singular_entry_with_parameters() {
        let content = indoc! {r#"
            #. Greets the user
            #. Parameter 1: name (example: Bob)
            #, c-format
            msgctxt "greeting"
            msgid "Hi %1$s"
            msgstr "Salut %1$s"
        "#};
        let format = Format::from_str(content).unwrap();
        assert_eq!(format.header, None);
        assert_eq!(format.entries.len(), 1);

        let entry = &format.entries[0];
        assert_eq!(entry.context.as_deref(), Some("greeting"));
        assert_eq!(entry.id, "Hi %1$s");
        assert_eq!(entry.translation, Translation::Singular("Salut %1$s".to_string()));
        assert_eq!(entry.parameters.get("1").map(String::as_str), Some("name"));
        assert!(entry.has_flag("c-format"));
        assert_eq!(
            entry.comments[0],
            Comment::Extracted("Greets the user".to_string())
        );
    }

    #[test]
    fn test_parse_header_is_split_off() {
        let content = indoc! {r#"
            msgid ""
            msgstr ""
            "Plural-Forms: nplurals=4; plural=n == 0 ? 0 : n == 1 ? 1 : n == 2 ? 2 : 3;"
        "#};
        let format = Format::from_str(content).unwrap();
        assert_eq!(format.header.as_deref(), Some(PLURAL_FORMS_HEADER));
        assert!(format.entries.is_empty());
    }

    #[test]
    fn test_parse_plural_entry_with_marker() {
        let content = indoc! {r#"
            #. Parameter 1: count
            #, c-format
            msgctxt "items"!
            msgid "one item"
            msgid_plural "%1$s items"
            msgstr[0] "none"
            msgstr[1] ""
            msgstr[2] ""
            msgstr[3] "%1$s total"
        "#};
        let format = Format::from_str(content).unwrap();
        let entry = &format.entries[0];
        assert!(entry.plural_context);
        assert_eq!(entry.context.as_deref(), Some("items"));
        assert!(entry.is_plural());
        assert_eq!(entry.translation.slot(PluralSlot::Zero), Some("none"));
        assert_eq!(entry.translation.slot(PluralSlot::One), Some(""));
        assert_eq!(entry.translation.slot(PluralSlot::Other), Some("%1$s total"));
    }

    #[test]
    fn test_continuation_lines_append_to_active_field() {
        let content = indoc! {r#"
            msgctxt "long"
            msgid ""
            "first "
            "second"
            msgstr "a\n"
            "b"
        "#};
        let format = Format::from_str(content).unwrap();
        let entry = &format.entries[0];
        assert_eq!(entry.id, "first second");
        assert_eq!(entry.translation, Translation::Singular("a\nb".to_string()));
    }

    #[test]
    fn test_entries_without_blank_lines_are_separated() {
        let content = indoc! {r#"
            msgctxt "a"
            msgid "x"
            msgstr "1"
            #. Parameter 1: p
            msgctxt "b"
            msgid "y %1$s"
            msgstr "2 %1$s"
            msgctxt "c"
            msgid "z"
            msgstr "3"
        "#};
        let format = Format::from_str(content).unwrap();
        assert_eq!(format.entries.len(), 3);
        assert!(format.entries[0].parameters.is_empty());
        assert_eq!(format.entries[1].parameters.get("1").map(String::as_str), Some("p"));
        assert_eq!(format.entries[2].context.as_deref(), Some("c"));
    }

    #[test]
    fn test_malformed_lines_are_ignored() {
        let content = indoc! {r#"
            garbage line
            #: lib/main.dart:12
            msgctxt "a"
            msgid "x"
            msgstr not-a-literal
            msgstr "ok"
        "#};
        let format = Format::from_str(content).unwrap();
        assert_eq!(format.entries.len(), 1);
        assert_eq!(format.entries[0].translation, Translation::Singular("ok".to_string()));
        assert!(format.entries[0].comments.is_empty());
    }

    #[test]
    fn test_trailing_comments_do_not_create_entries() {
        let format = Format::from_str("#. dangling\n").unwrap();
        assert!(format.entries.is_empty());
        assert!(Format::from_str("").unwrap().entries.is_empty());
    }

    #[test]
    fn test_write_then_parse_is_identity() {
        let format = Format {
            header: Some(PLURAL_FORMS_HEADER.to_string()),
            entries: vec![
                Entry {
                    comments: vec![
                        Comment::Extracted("Parameter 1: n".to_string()),
                        Comment::Flag("c-format".to_string()),
                    ],
                    context: Some("items".to_string()),
                    plural_context: true,
                    id: "one \"item\"".to_string(),
                    translation: Translation::Plural {
                        id_plural: "%1$s items".to_string(),
                        translations: [
                            String::new(),
                            "un".to_string(),
                            String::new(),
                            "%1$s\nobjets".to_string(),
                        ],
                    },
                    parameters: [("1".to_string(), "n".to_string())].into_iter().collect(),
                },
                Entry {
                    comments: vec![Comment::Flag("no-c-format".to_string())],
                    context: Some("plain".to_string()),
                    plural_context: false,
                    id: "back\\slash".to_string(),
                    translation: Translation::Singular(String::new()),
                    parameters: IndexMap::new(),
                },
            ],
        };
        let text = format.to_string_content().unwrap();
        assert_eq!(Format::from_str(&text).unwrap(), format);
    }

    #[test]
    fn test_write_layout() {
        let format = Format {
            header: Some(PLURAL_FORMS_HEADER.to_string()),
            entries: vec![Entry {
                comments: vec![Comment::Flag("no-c-format".to_string())],
                context: Some("foo".to_string()),
                plural_context: false,
                id: "bar".to_string(),
                translation: Translation::Singular(String::new()),
                parameters: IndexMap::new(),
            }],
        };
        let expected = indoc! {r#"
            msgid ""
            msgstr ""
            "Plural-Forms: nplurals=4; plural=n == 0 ? 0 : n == 1 ? 1 : n == 2 ? 2 : 3;"

            #, no-c-format
            msgctxt "foo"
            msgid "bar"
            msgstr ""
        "#};
        assert_eq!(format.to_string_content().unwrap(), expected);
    }
}
