//! File-level conversion between ARB documents and PO catalogs.
//!
//! These functions read their inputs from disk, run [`crate::export()`] or
//! [`crate::import()`], and write the result.

use std::{fs::File, io::BufWriter, path::Path};

use crate::{
    error::Error,
    export::export,
    formats::{ArbFormat, FormatType, PoFormat},
    import::import,
    options::ConvertOptions,
    traits::Parser,
};

/// Writes the PO catalog for an ARB source document.
///
/// # Arguments
///
/// * `source` - The ARB document in the source language.
/// * `translated` - An ARB document with existing translations, if any.
/// * `output` - The PO file to write.
/// * `options` - Conversion options.
///
/// # Errors
///
/// Returns an `Error` if reading, parsing, converting, or writing fails.
///
/// # Example
///
/// ```rust,no_run
/// use arbpo::{ConvertOptions, converter::export_file};
/// export_file("app_en.arb", Some("app_fr.arb"), "fr.po", &ConvertOptions::new())?;
/// # Ok::<(), arbpo::Error>(())
/// ```
pub fn export_file<P: AsRef<Path>>(
    source: P,
    translated: Option<P>,
    output: P,
    options: &ConvertOptions,
) -> Result<(), Error> {
    let source = ArbFormat::read_from(source)?;
    let translated = match translated {
        Some(path) => ArbFormat::read_from(path)?,
        None => ArbFormat::new(),
    };
    export(&source, &translated, options)?.write_to(output)
}

/// Writes the translated ARB document for a PO catalog.
///
/// The document is indented by `options.indent` spaces.
///
/// # Example
///
/// ```rust,no_run
/// use arbpo::{ConvertOptions, converter::import_file};
/// let options = ConvertOptions::new().with_locale(Some("fr".to_string()));
/// import_file("fr.po", "app_fr.arb", &options)?;
/// # Ok::<(), arbpo::Error>(())
/// ```
pub fn import_file<P: AsRef<Path>>(
    input: P,
    output: P,
    options: &ConvertOptions,
) -> Result<(), Error> {
    let catalog = PoFormat::read_from(input)?;
    let document = import(&catalog, options)?;
    let file = File::create(output)?;
    document.to_writer_with_indent(BufWriter::new(file), options.indent)
}

/// Converts a file, inferring the direction from both file extensions.
///
/// ARB → PO runs an export with no translations (a template); PO → ARB runs
/// an import.
///
/// # Errors
///
/// Returns [`Error::UnknownFormat`] when an extension is not recognized and
/// [`Error::UnsupportedFormat`] when both files have the same format.
///
/// # Example
///
/// ```rust,no_run
/// use arbpo::{ConvertOptions, converter::convert_auto};
/// convert_auto("app_en.arb", "template.pot", &ConvertOptions::new())?;
/// # Ok::<(), arbpo::Error>(())
/// ```
pub fn convert_auto<P: AsRef<Path>>(
    input: P,
    output: P,
    options: &ConvertOptions,
) -> Result<(), Error> {
    let input_format = infer_format_from_extension(&input).ok_or_else(|| {
        Error::UnknownFormat(format!(
            "Cannot infer input format from extension: {:?}",
            input.as_ref().extension()
        ))
    })?;
    let output_format = infer_format_from_extension(&output).ok_or_else(|| {
        Error::UnknownFormat(format!(
            "Cannot infer output format from extension: {:?}",
            output.as_ref().extension()
        ))
    })?;
    tracing::debug!(%input_format, %output_format, "converting");

    match (input_format, output_format) {
        (FormatType::Arb, FormatType::Po) => export_file(input, None, output, options),
        (FormatType::Po, FormatType::Arb) => import_file(input, output, options),
        (from, to) => Err(Error::UnsupportedFormat(format!(
            "cannot convert {} to {}",
            from, to
        ))),
    }
}

/// Infers a [`FormatType`] from a file path's extension.
///
/// # Example
/// ```rust
/// use arbpo::formats::FormatType;
/// use arbpo::converter::infer_format_from_extension;
///
/// assert_eq!(infer_format_from_extension("app_en.arb"), Some(FormatType::Arb));
/// assert_eq!(infer_format_from_extension("fr.po"), Some(FormatType::Po));
/// assert_eq!(infer_format_from_extension("strings.xml"), None);
/// ```
pub fn infer_format_from_extension<P: AsRef<Path>>(path: P) -> Option<FormatType> {
    FormatType::from_path(path)
}
