//! ARB → PO: builds the catalog handed to translators.
//!
//! Every message of the source document becomes one catalog entry, in
//! document order. Translations come from an optional second ARB document;
//! anything missing there is written as an empty translation.

use indexmap::IndexMap;

use crate::{
    error::Error,
    escape::escape_literal,
    formats::{
        arb::Format as ArbFormat,
        po::{Comment, Entry, Format as PoFormat, PLURAL_FORMS_HEADER, Translation},
    },
    options::ConvertOptions,
    placeholder::{collapse_icu_quotes, to_positional},
    plural::{PluralExpression, is_plural},
    types::{Message, PluralSlot},
};

/// Builds the catalog for `source`, filling translations from `translated`.
///
/// Pass an empty document as `translated` to get a template with empty
/// translations.
///
/// # Example
///
/// ```rust
/// use arbpo::{ArbFormat, ConvertOptions, export};
/// use arbpo::traits::Parser;
///
/// let source = ArbFormat::from_str(r#"{"greeting": "Hi {name}", "@greeting": {"placeholders": {"name": {}}}}"#)?;
/// let catalog = export(&source, &ArbFormat::new(), &ConvertOptions::new())?;
/// assert_eq!(catalog.entries[0].id, "Hi %1$s");
/// # Ok::<(), arbpo::Error>(())
/// ```
pub fn export(
    source: &ArbFormat,
    translated: &ArbFormat,
    options: &ConvertOptions,
) -> Result<PoFormat, Error> {
    let mut catalog = PoFormat {
        header: Some(PLURAL_FORMS_HEADER.to_string()),
        entries: Vec::with_capacity(source.len()),
    };

    for (key, message) in &source.messages {
        match export_message(key, message, translated.get(key)) {
            Ok(entry) => catalog.entries.push(entry),
            Err(e) if options.skip_invalid => {
                tracing::warn!(key = %key, error = %e, "skipping message");
            }
            Err(e) => {
                return Err(Error::conversion_error(
                    format!("cannot export message `{}`", key),
                    Some(Box::new(e)),
                ));
            }
        }
    }

    tracing::debug!(
        messages = source.len(),
        entries = catalog.entries.len(),
        "exported catalog"
    );
    Ok(catalog)
}

/// Builds the catalog entry for one message.
///
/// A message becomes a plural entry only when its value is a plural
/// expression *and* it declares placeholders; everything else is singular.
pub fn export_message(
    key: &str,
    source: &Message,
    translated: Option<&Message>,
) -> Result<Entry, Error> {
    let names = source.placeholder_names();

    let mut comments = Vec::new();
    if let Some(description) = source.description() {
        comments.extend(
            description
                .lines()
                .map(|line| Comment::Extracted(line.to_string())),
        );
    }

    let mut parameters = IndexMap::new();
    for (index, (name, placeholder)) in source.placeholders().enumerate() {
        let mut text = format!("Parameter {}: {}", index + 1, name);
        if let Some(example) = placeholder.example_text() {
            text.push_str(&format!(" (example: {})", example));
        }
        comments.push(Comment::Extracted(text));
        parameters.insert((index + 1).to_string(), name.to_string());
    }

    let flag = if names.is_empty() {
        "no-c-format"
    } else {
        "c-format"
    };
    comments.push(Comment::Flag(flag.to_string()));

    if names.is_empty() || !is_plural(&source.value) {
        let id = to_positional(&source.value, &names, false);
        let translation = translated
            .map(|message| to_positional(&message.value, &names, false))
            .unwrap_or_default();
        tracing::trace!(key, "exported singular message");
        return Ok(Entry {
            comments,
            context: Some(key.to_string()),
            plural_context: false,
            id,
            translation: Translation::Singular(translation),
            parameters,
        });
    }

    let plural = PluralExpression::parse(&source.value)?;
    let translated_plural = match translated {
        Some(message) => parse_translated_plural(&message.value)?,
        None => None,
    };

    if let Some(zero) = plural.slot(PluralSlot::Zero) {
        comments.push(Comment::Extracted(format!(
            "If zero: \"{}\"",
            escape_literal(zero)
        )));
    }

    let other = plural.slot(PluralSlot::Other).ok_or_else(|| {
        Error::plural_syntax(format!("missing `other` clause in `{}`", source.value))
    })?;
    let id_plural = prepare_plural_text(other, &names);
    // ICU allows leaving out `one`; the `other` text stands in for it then.
    let id = plural
        .slot(PluralSlot::One)
        .map(|one| prepare_plural_text(one, &names))
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| id_plural.clone());

    let translations = PluralSlot::ALL.map(|slot| {
        translated_plural
            .as_ref()
            .and_then(|plural| plural.slot(slot))
            .map(|text| prepare_plural_text(text, &names))
            .unwrap_or_default()
    });

    tracing::trace!(key, "exported plural message");
    Ok(Entry {
        comments,
        context: Some(key.to_string()),
        plural_context: true,
        id,
        translation: Translation::Plural {
            id_plural,
            translations,
        },
        parameters,
    })
}

/// Positional markers plus ICU quote collapsing, for plural pattern text.
fn prepare_plural_text(text: &str, names: &[&str]) -> String {
    collapse_icu_quotes(&to_positional(text, names, true))
}

/// An empty translation counts as missing; anything else must be a plural
/// expression as well.
fn parse_translated_plural(value: &str) -> Result<Option<PluralExpression>, Error> {
    if value.is_empty() {
        return Ok(None);
    }
    if !is_plural(value) {
        return Err(Error::plural_syntax(format!(
            "translation `{}` of a plural message is not a plural expression",
            value
        )));
    }
    PluralExpression::parse(value).map(Some)
}
