//! ICU plural expressions: detection, extraction into selector patterns and
//! rendering of the four-slot model back into ICU syntax.
//!
//! Only the `{var, plural, selector{text} ...}` shape is understood. `select`,
//! `selectordinal` and nested expressions outside the pattern texts are
//! rejected or left untouched.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

use crate::{error::Error, types::PluralSlot};

lazy_static! {
    /// A whole value wrapped in one top-level plural expression.
    static ref PLURAL_REGEX: Regex = Regex::new(r"(?s)^\{.+, *plural, .+\}$").unwrap();
}

/// Returns true when the entire value is a single `{var, plural, ...}` expression.
///
/// Text before or after the expression makes the value a plain string.
/// Unbalanced braces still count as plural so [`PluralExpression::parse`]
/// can report them.
pub fn is_plural(value: &str) -> bool {
    if !PLURAL_REGEX.is_match(value) {
        return false;
    }
    match extract_braced(value) {
        Ok((close, interior)) => {
            close + 1 == value.len()
                && interior.splitn(3, ',').nth(1).map(str::trim) == Some("plural")
        }
        Err(_) => true,
    }
}

/// A parsed `{variable, plural, ...}` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralExpression {
    /// Name of the selector variable.
    pub variable: String,
    /// Selector token (`=0`, `one`, `other`, ...) to raw pattern text, in
    /// source order. A repeated selector keeps its last text.
    pub patterns: IndexMap<String, String>,
}

impl PluralExpression {
    /// Parses a plural expression.
    ///
    /// # Example
    ///
    /// ```rust
    /// use arbpo::plural::PluralExpression;
    /// use arbpo::types::PluralSlot;
    ///
    /// let plural = PluralExpression::parse("{count, plural, =0{none} other{# items}}")?;
    /// assert_eq!(plural.variable, "count");
    /// assert_eq!(plural.slot(PluralSlot::Zero), Some("none"));
    /// assert_eq!(plural.slot(PluralSlot::One), None);
    /// # Ok::<(), arbpo::Error>(())
    /// ```
    pub fn parse(source: &str) -> Result<Self, Error> {
        let source = source.trim();
        let (close, interior) = extract_braced(source)?;
        let trailing = &source[close + 1..];
        if !trailing.is_empty() {
            return Err(Error::plural_syntax(format!(
                "unexpected text `{}` after plural expression in `{}`",
                trailing, source
            )));
        }

        let mut sections = interior.splitn(3, ',');
        let variable = sections.next().unwrap_or_default().trim().to_string();
        let tag = sections.next().map(str::trim).unwrap_or_default();
        if tag != "plural" {
            return Err(Error::plural_syntax(format!(
                "expected `plural` but found `{}` in `{}`",
                tag, source
            )));
        }

        let mut patterns = IndexMap::new();
        let mut rest = sections.next().unwrap_or_default().trim();
        while !rest.is_empty() {
            let open = rest.find('{').ok_or_else(|| {
                Error::plural_syntax(format!("missing `{{` after selector in `{}`", rest))
            })?;
            let selector = rest[..open].trim();
            let (close, text) = extract_braced(&rest[open..])?;
            patterns.insert(selector.to_string(), text.to_string());
            rest = rest[open + close + 1..].trim_start();
        }

        Ok(PluralExpression { variable, patterns })
    }

    /// Pattern text for a slot. The exact-value selector (`=1`) wins over the
    /// category selector (`one`).
    pub fn slot(&self, slot: PluralSlot) -> Option<&str> {
        slot.exact_selector()
            .and_then(|selector| self.patterns.get(selector))
            .or_else(|| self.patterns.get(slot.category()))
            .map(String::as_str)
    }
}

/// Extracts the text inside the brace pair that opens `text`.
///
/// Returns the byte index of the matching closing brace and the text between
/// the braces. Nested braces are balanced with a depth counter.
pub fn extract_braced(text: &str) -> Result<(usize, &str), Error> {
    if !text.starts_with('{') {
        return Err(Error::plural_syntax(format!(
            "expected `{{` at the start of `{}`",
            text
        )));
    }

    let mut depth = 0usize;
    for (index, byte) in text.bytes().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((index, &text[1..index]));
                }
            }
            _ => {}
        }
    }

    Err(Error::plural_syntax(format!("unbalanced braces in `{}`", text)))
}

/// Renders slot texts (indexed like `msgstr[N]`) as an ICU plural expression.
///
/// Empty `=0`/`=1`/`=2` clauses are left out while `other` is always written.
/// When every slot is empty the result is the empty string.
pub fn render_plural(variable: &str, slots: &[String; 4]) -> String {
    if slots.iter().all(String::is_empty) {
        return String::new();
    }

    let clauses = PluralSlot::ALL
        .iter()
        .filter(|slot| **slot == PluralSlot::Other || !slots[slot.index()].is_empty())
        .map(|slot| format!("{} {{{}}}", slot.output_selector(), slots[slot.index()]))
        .collect::<Vec<_>>();

    format!("{{{}, plural, {}}}", variable, clauses.join(" "))
}
