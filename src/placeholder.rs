//! Placeholder rewriting between ICU and catalog notation.
//!
//! ICU messages name their arguments (`{name}`), catalog strings number them
//! (`%1$s`). The number of a name is its 1-based position in the source
//! message's placeholder declarations, so translators can move markers around
//! freely while each marker keeps pointing at the same argument.
//!
//! Inside plural patterns ICU also uses `#` for the plural count and the
//! apostrophe for quoting, both of which need translating as well.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// An apostrophe at the start of the text or after a non-apostrophe.
    static ref ICU_APOSTROPHE_REGEX: Regex = Regex::new(r"([^']|^)'").unwrap();
}

/// Positional marker for a 1-based placeholder position.
pub fn marker(position: usize) -> String {
    format!("%{}$s", position)
}

/// Replaces every `{name}` with its positional marker.
///
/// With `count_sharp` set (plural pattern texts) an unquoted `#` becomes the
/// first marker too. A `#` is quoted when an odd number of apostrophes
/// precedes it.
///
/// # Example
///
/// ```rust
/// use arbpo::placeholder::to_positional;
///
/// assert_eq!(to_positional("{b} and {a}", &["a", "b"], false), "%2$s and %1$s");
/// assert_eq!(to_positional("# left, '#' kept", &["n"], true), "%1$s left, '#' kept");
/// ```
pub fn to_positional(text: &str, names: &[&str], count_sharp: bool) -> String {
    let mut product = text.to_string();
    for (index, name) in names.iter().enumerate() {
        product = product.replace(&format!("{{{}}}", name), &marker(index + 1));
    }

    if count_sharp {
        product = replace_unquoted_sharps(&product);
    }
    product
}

// Single pass with a running apostrophe parity.
fn replace_unquoted_sharps(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut apostrophes = 0usize;
    for c in text.chars() {
        match c {
            '\'' => {
                apostrophes += 1;
                out.push(c);
            }
            '#' if apostrophes % 2 == 0 => out.push_str(&marker(1)),
            _ => out.push(c),
        }
    }
    out
}

/// Replaces positional markers with `{name}` using a position → name mapping
/// recovered from parameter comments.
pub fn from_positional(text: &str, parameters: &IndexMap<String, String>) -> String {
    parameters
        .iter()
        .fold(text.to_string(), |product, (position, name)| {
            product.replace(&format!("%{}$s", position), &format!("{{{}}}", name))
        })
}

/// Quotes characters that ICU treats specially inside plural patterns:
/// `'` becomes `''` and `#` becomes `'#'`.
pub fn quote_icu_literals(text: &str) -> String {
    text.replace('\'', "''").replace('#', "'#'")
}

/// Drops ICU quoting apostrophes from plural pattern text: every apostrophe at
/// the start or after a non-apostrophe is removed, so `''` reads as `'` and
/// `'#'` as `#`.
pub fn collapse_icu_quotes(text: &str) -> String {
    ICU_APOSTROPHE_REGEX.replace_all(text, "${1}").into_owned()
}
