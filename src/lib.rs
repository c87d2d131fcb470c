//! Convert Flutter ARB localization files to gettext PO catalogs and back.
//!
//! ARB messages are ICU MessageFormat strings with named placeholders
//! (`{name}`) and plural expressions (`{count, plural, =1{..} other{..}}`).
//! PO catalogs use positional markers (`%1$s`) and a fixed four-slot plural
//! layout (zero, one, two, other). [`export()`] goes from ARB to PO,
//! [`import()`] comes back.
//!
//! ```rust
//! use arbpo::{ArbFormat, ConvertOptions, export, import};
//! use arbpo::traits::Parser;
//!
//! let source = ArbFormat::from_str(r#"{"farewell": "Bye"}"#)?;
//! let translated = ArbFormat::from_str(r#"{"farewell": "Salut"}"#)?;
//! let catalog = export(&source, &translated, &ConvertOptions::new())?;
//! let back = import(&catalog, &ConvertOptions::new())?;
//! assert_eq!(back.get("farewell").map(|m| m.value.as_str()), Some("Salut"));
//! # Ok::<(), arbpo::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod converter;
pub mod error;
pub mod escape;
pub mod export;
pub mod formats;
pub mod import;
pub mod options;
pub mod placeholder;
pub mod plural;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    converter::{convert_auto, export_file, import_file, infer_format_from_extension},
    error::Error,
    export::export,
    formats::{ArbFormat, FormatType, PoFormat},
    import::import,
    options::ConvertOptions,
    types::{Attributes, Message, Placeholder, PluralSlot},
};
