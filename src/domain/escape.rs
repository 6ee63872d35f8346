//! Escape grammar shared by all name representations.
//!
//! Inside a rendered name a literal escape character is written twice and a
//! literal delimiter is prefixed by one escape character. Everything else is
//! passed through.

use crate::domain::error::{NameError, NameResult};

/// Delimiter used when none is given, and for the canonical data string.
pub const DEFAULT_DELIMITER: char = '.';

/// Masks a literal delimiter or escape character. Fixed for the process.
pub const ESCAPE_CHARACTER: char = '\\';

pub fn is_valid_delimiter(delimiter: char) -> bool {
    delimiter != ESCAPE_CHARACTER
}

/// Turn a delimiter argument into a `char`.
///
/// The argument must hold exactly one character, and that character must not
/// be the escape character.
pub fn parse_delimiter(delimiter: &str) -> NameResult<char> {
    let mut chars = delimiter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            NameError::ensure_argument(
                is_valid_delimiter(c),
                "delimiter must not be the escape character",
            )?;
            Ok(c)
        }
        _ => Err(NameError::illegal_argument(format!(
            "delimiter must be a single character, got {:?}",
            delimiter
        ))),
    }
}

/// Resolve an optional delimiter override, falling back to [`DEFAULT_DELIMITER`].
pub fn delimiter_or_default(delimiter: Option<&str>) -> NameResult<char> {
    delimiter.map_or(Ok(DEFAULT_DELIMITER), parse_delimiter)
}

/// Mask every escape character and every `delimiter` in `component`.
pub fn escape(component: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(component.len());
    for c in component.chars() {
        if c == ESCAPE_CHARACTER || c == delimiter {
            out.push(ESCAPE_CHARACTER);
        }
        out.push(c);
    }
    out
}

/// Left inverse of [`escape`].
///
/// An escaped `delimiter` becomes `render_delimiter`, an escaped escape
/// character becomes a single escape character. The scan is left to right, so
/// in `\\.` the first pair is the escaped escape and the `.` stays literal.
/// Any other escape sequence is kept as written.
pub fn unescape(component: &str, delimiter: char, render_delimiter: char) -> String {
    let mut out = String::with_capacity(component.len());
    let mut chars = component.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ESCAPE_CHARACTER {
            match chars.peek() {
                Some(&next) if next == delimiter => {
                    chars.next();
                    out.push(render_delimiter);
                    continue;
                }
                Some(&next) if next == ESCAPE_CHARACTER => {
                    chars.next();
                    out.push(ESCAPE_CHARACTER);
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }
    out
}

/// Escape each component against `delimiter` and join them with it.
pub fn join_escaped<S: AsRef<str>>(components: &[S], delimiter: char) -> String {
    let mut out = String::new();
    for (i, component) in components.iter().enumerate() {
        if i > 0 {
            out.push(delimiter);
        }
        out.push_str(&escape(component.as_ref(), delimiter));
    }
    out
}

/// Split a delimited, escaped string into its components.
///
/// An escape character consumes exactly the next character, whatever it is,
/// and is itself dropped. An unescaped `delimiter` closes the current
/// component. The last component is always emitted, so input without
/// delimiters yields one component and a trailing delimiter yields a trailing
/// empty component. A dangling escape at the end of input is dropped.
pub fn split_components(name: &str, delimiter: char) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut escaped = false;

    for c in name.chars() {
        if escaped {
            current.push(c);
            escaped = false;
        } else if c == ESCAPE_CHARACTER {
            escaped = true;
        } else if c == delimiter {
            result.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }

    result.push(current);
    result
}
