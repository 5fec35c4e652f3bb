//! Quote- and escape-aware splitting of the flag region into fragments.

use crate::error::{InvalidFlagError, Result};

/// Splits a flag region into literal fragments.
///
/// Fragments are separated by unquoted spaces. A `'` or `"` opens a quoted
/// section that only the same character closes; the quotes themselves are
/// dropped. A backslash takes the next character literally, inside or outside
/// quotes. A backslash at the very end of the region is kept as is.
///
/// # Errors
///
/// Returns [`InvalidFlagError`] carrying the partial fragment when a quote is
/// still open at the end of the region.
///
/// # Examples
///
/// ```
/// use cmdline_core::split_fragments;
///
/// let fragments = split_fragments(r#"--foo "bar baz" -m=it\'s"#).unwrap();
/// assert_eq!(fragments, vec!["--foo", "bar baz", "-m=it's"]);
///
/// assert!(split_fragments("-f 'as").is_err());
/// ```
pub fn split_fragments(region: &str) -> Result<Vec<String>> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = region.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' && chars.peek().is_some() {
            if let Some(escaped) = chars.next() {
                current.push(escaped);
            }
            continue;
        }

        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                ' ' => {
                    if !current.is_empty() {
                        fragments.push(std::mem::take(&mut current));
                    }
                }
                other => current.push(other),
            },
        }
    }

    if quote.is_some() {
        return Err(InvalidFlagError::new(current));
    }

    if !current.is_empty() {
        fragments.push(current);
    }

    Ok(fragments)
}
