//! Options controlling a conversion run.

use unic_langid::LanguageIdentifier;

use crate::{error::Error, formats::arb::DEFAULT_INDENT};

/// Conversion behavior shared by both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Indentation (in spaces) of written ARB documents.
    pub indent: usize,
    /// Skip messages whose plural expression cannot be processed instead of
    /// failing the whole run. Skipped messages are logged as warnings.
    pub skip_invalid: bool,
    /// Value written to `@@locale` of generated ARB documents.
    pub locale: Option<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            indent: DEFAULT_INDENT,
            skip_invalid: false,
            locale: None,
        }
    }
}

impl ConvertOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ARB output indentation.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Enables/disables skipping of invalid messages.
    pub fn with_skip_invalid(mut self, skip_invalid: bool) -> Self {
        self.skip_invalid = skip_invalid;
        self
    }

    /// Sets the locale written to `@@locale`.
    pub fn with_locale(mut self, locale: Option<String>) -> Self {
        self.locale = locale;
        self
    }

    /// The configured locale, checked to be a valid language identifier.
    ///
    /// Flutter spells locales with underscores (`pt_BR`); that spelling is
    /// accepted and returned unchanged. Fails with [`Error::InvalidResource`]
    /// when the locale does not parse.
    pub fn validated_locale(&self) -> Result<Option<String>, Error> {
        self.locale
            .as_deref()
            .map(|locale| {
                locale
                    .replace('_', "-")
                    .parse::<LanguageIdentifier>()
                    .map(|_| locale.to_string())
                    .map_err(|e| {
                        Error::InvalidResource(format!("invalid locale `{}`: {}", locale, e))
                    })
            })
            .transpose()
    }
}
