//! PO → ARB: rebuilds a translated ARB document from a catalog.

use crate::{
    error::Error,
    formats::{
        arb::Format as ArbFormat,
        po::{Entry, Format as PoFormat, Translation},
    },
    options::ConvertOptions,
    placeholder::{from_positional, quote_icu_literals},
    plural::render_plural,
    types::{Attributes, Message, PluralSlot},
};

/// Builds an ARB document holding every translated entry of `catalog`.
///
/// Untranslated entries are left out. Entries keep their catalog order.
pub fn import(catalog: &PoFormat, options: &ConvertOptions) -> Result<ArbFormat, Error> {
    let mut document = ArbFormat::new();
    document.locale = options.validated_locale()?;

    for entry in &catalog.entries {
        match import_entry(entry) {
            Ok(Some((key, message))) => document.insert(key, message),
            Ok(None) => {}
            Err(e) if options.skip_invalid => {
                tracing::warn!(id = %entry.id, error = %e, "skipping entry");
            }
            Err(e) => {
                return Err(Error::conversion_error(
                    format!("cannot import entry `{}`", entry.id),
                    Some(Box::new(e)),
                ));
            }
        }
    }

    tracing::debug!(
        entries = catalog.entries.len(),
        messages = document.len(),
        "imported catalog"
    );
    Ok(document)
}

/// Turns one catalog entry into a keyed message.
///
/// Returns `Ok(None)` for entries that produce nothing: the header, entries
/// without `msgctxt` and entries without any translated text.
pub fn import_entry(entry: &Entry) -> Result<Option<(String, Message)>, Error> {
    if entry.id.is_empty() {
        return Ok(None);
    }
    let Some(key) = entry.context.as_deref() else {
        tracing::warn!(id = %entry.id, "ignoring entry without msgctxt");
        return Ok(None);
    };
    if entry.translation.is_empty() {
        tracing::trace!(key, "untranslated");
        return Ok(None);
    }

    let value = match &entry.translation {
        Translation::Singular(text) => from_positional(text, &entry.parameters),
        Translation::Plural { .. } => {
            let variable = counting_parameter(entry)?;
            let slots = PluralSlot::ALL.map(|slot| match entry.translation.slot(slot) {
                Some(text) if !text.is_empty() => {
                    from_positional(&quote_icu_literals(text), &entry.parameters)
                }
                _ => String::new(),
            });
            render_plural(variable, &slots)
        }
    };
    if value.is_empty() {
        return Ok(None);
    }

    let mut message = Message::new(value);
    if !entry.parameters.is_empty() {
        message = message.with_attributes(Attributes::from_placeholder_names(
            entry.parameters.values().map(String::as_str),
        ));
    }
    Ok(Some((key.to_string(), message)))
}

/// The name behind `%1$s`, which is what `#` stood for on export.
fn counting_parameter(entry: &Entry) -> Result<&str, Error> {
    entry
        .parameters
        .get("1")
        .or_else(|| entry.parameters.values().next())
        .map(String::as_str)
        .ok_or_else(|| {
            Error::InvalidResource(format!(
                "plural entry `{}` declares no parameters",
                entry.id
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::po::Comment;
    use indexmap::IndexMap;

    fn entry(context: &str, translation: Translation, parameters: &[(&str, &str)]) -> Entry {
        Entry {
            comments: vec![Comment::Flag("c-format".to_string())],
            context: Some(context.to_string()),
            plural_context: matches!(translation, Translation::Plural { .. }),
            id: "source".to_string(),
            translation,
            parameters: parameters
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<IndexMap<_, _>>(),
        }
    }

    fn plural(slots: [&str; 4]) -> Translation {
        Translation::Plural {
            id_plural: "sources".to_string(),
            translations: slots.map(str::to_string),
        }
    }

    #[test]
    fn test_singular_with_parameters() {
        let (key, message) = import_entry(&entry(
            "greeting",
            Translation::Singular("Bonjour %1$s".to_string()),
            &[("1", "name")],
        ))
        .unwrap()
        .unwrap();
        assert_eq!(key, "greeting");
        assert_eq!(message.value, "Bonjour {name}");
        assert_eq!(message.placeholder_names(), vec!["name"]);
    }

    #[test]
    fn test_singular_without_parameters_has_no_attributes() {
        let (_, message) = import_entry(&entry("foo", Translation::Singular("bar".to_string()), &[]))
            .unwrap()
            .unwrap();
        assert!(message.attributes.is_none());
    }

    #[test]
    fn test_untranslated_entries_are_dropped() {
        let singular = entry("foo", Translation::Singular(String::new()), &[]);
        assert!(import_entry(&singular).unwrap().is_none());

        let empty_plural = entry("bar", plural(["", "", "", ""]), &[("1", "n")]);
        assert!(import_entry(&empty_plural).unwrap().is_none());
    }

    #[test]
    fn test_plural_quotes_icu_literals() {
        let (_, message) = import_entry(&entry(
            "items",
            plural(["none", "", "", "%1$s it's #1"]),
            &[("1", "count")],
        ))
        .unwrap()
        .unwrap();
        assert_eq!(
            message.value,
            "{count, plural, =0 {none} other {{count} it''s '#'1}}"
        );
    }

    #[test]
    fn test_plural_variable_falls_back_to_first_parameter() {
        let (_, message) = import_entry(&entry("foo", plural(["", "x", "", "y"]), &[("2", "n")]))
            .unwrap()
            .unwrap();
        assert!(message.value.starts_with("{n, plural, =1 {x}"));
    }

    #[test]
    fn test_plural_without_parameters_is_an_error() {
        let err = import_entry(&entry("foo", plural(["", "", "", "y"]), &[])).unwrap_err();
        assert!(matches!(err, Error::InvalidResource(_)));
    }

    #[test]
    fn test_import_skips_invalid_entries_when_asked() {
        let catalog = PoFormat {
            header: None,
            entries: vec![
                entry("bad", plural(["", "", "", "y"]), &[]),
                entry("good", Translation::Singular("ok".to_string()), &[]),
            ],
        };
        assert!(import(&catalog, &ConvertOptions::new()).is_err());

        let options = ConvertOptions::new()
            .with_skip_invalid(true)
            .with_locale(Some("fr".to_string()));
        let document = import(&catalog, &options).unwrap();
        assert_eq!(document.locale.as_deref(), Some("fr"));
        assert_eq!(document.messages.keys().collect::<Vec<_>>(), vec!["good"]);
    }
}
