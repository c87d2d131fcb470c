//! The two document formats handled by arbpo.
//!
//! This module re-exports the main type of each format and provides the
//! [`FormatType`] enum for picking a conversion direction from file names.

pub mod arb;
pub mod po;

use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

// Reexporting the formats for easier access
pub use arb::Format as ArbFormat;
pub use po::Format as PoFormat;

use crate::Error;

/// Represents the supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Application Resource Bundle (`.arb`, JSON).
    Arb,
    /// gettext catalog (`.po`, `.pot`).
    Po,
}

impl FormatType {
    /// The canonical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Arb => "arb",
            FormatType::Po => "po",
        }
    }

    /// Infers the format from a file extension (case-insensitive).
    ///
    /// `.arb` and `.json` map to [`FormatType::Arb`]; `.po` and `.pot` to
    /// [`FormatType::Po`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?;
        extension.parse().ok()
    }
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// # Example
/// ```rust
/// use arbpo::formats::FormatType;
/// assert_eq!(FormatType::Arb.to_string(), "arb");
/// assert_eq!(FormatType::Po.to_string(), "po");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Implements [`std::str::FromStr`] for [`FormatType`].
///
/// Returns [`crate::error::Error::UnknownFormat`] for unknown strings.
///
/// # Example
/// ```rust
/// use arbpo::formats::FormatType;
/// assert_eq!("ARB".parse::<FormatType>().unwrap(), FormatType::Arb);
/// assert_eq!("pot".parse::<FormatType>().unwrap(), FormatType::Po);
/// assert!("xliff".parse::<FormatType>().is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arb" | "json" => Ok(FormatType::Arb),
            "po" | "pot" | "gettext" => Ok(FormatType::Po),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(FormatType::from_path("l10n/app_en.arb"), Some(FormatType::Arb));
        assert_eq!(FormatType::from_path("intl_fr.JSON"), Some(FormatType::Arb));
        assert_eq!(FormatType::from_path("fr.po"), Some(FormatType::Po));
        assert_eq!(FormatType::from_path("messages.pot"), Some(FormatType::Po));
        assert_eq!(FormatType::from_path("strings.xml"), None);
        assert_eq!(FormatType::from_path("no_extension"), None);
    }

    #[test]
    fn test_unknown_format() {
        let err = "xml".parse::<FormatType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown format `xml`");
    }
}
