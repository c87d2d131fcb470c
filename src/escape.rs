//! String-literal encoding for PO catalog values.
//!
//! Values are written between double quotes with `\`, `"` and newlines
//! escaped. Reading accepts the usual C-style escape sequences, including
//! `\xHH` and `\uHHHH`, so catalogs touched by other tools still decode.

/// Escapes a value for use inside a quoted catalog string.
pub fn escape_literal(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Wraps an already escaped payload in double quotes.
pub fn quote(escaped: &str) -> String {
    format!("\"{}\"", escaped)
}

/// Decodes one quoted catalog string such as `"a\"b\n"`.
///
/// Returns `None` when `literal` (after trimming) is not a single complete
/// quoted string.
pub fn unescape_literal(literal: &str) -> Option<String> {
    let body = literal.trim().strip_prefix('"')?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    loop {
        match chars.next()? {
            '"' => break,
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                '0' => out.push('\0'),
                'a' => out.push('\u{07}'),
                'b' => out.push('\u{08}'),
                'f' => out.push('\u{0C}'),
                'v' => out.push('\u{0B}'),
                '\\' => out.push('\\'),
                '"' => out.push('"'),
                '\'' => out.push('\''),
                'x' => out.push(read_hex(&mut chars, 2)?),
                'u' => out.push(read_hex(&mut chars, 4)?),
                'U' => out.push(read_hex(&mut chars, 8)?),
                other => {
                    out.push('\\');
                    out.push(other);
                }
            },
            c => out.push(c),
        }
    }

    // Nothing but whitespace may follow the closing quote.
    if chars.as_str().trim().is_empty() {
        Some(out)
    } else {
        None
    }
}

fn read_hex(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let hex: String = chars.by_ref().take(digits).collect();
    if hex.len() != digits {
        return None;
    }
    u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
}
