//! Flag classification and key/value assembly.
//!
//! Fragments from [`split_fragments`] are classified by an explicit check of
//! the leading dash run and the first `=`:
//!
//! | Fragment          | Shape                     |
//! |-------------------|---------------------------|
//! | `--name=value`    | flag with explicit value  |
//! | `-n=value`        | flag with explicit value  |
//! | `--name`, `-n`    | flag opening the cursor   |
//! | `value`           | bare value                |
//!
//! Bare values attach to the last flag opened without an explicit value.

use tracing::trace;

use crate::error::{InvalidFlagError, Result};
use crate::tokenizer::split_fragments;
use crate::types::FlagMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fragment<'a> {
    /// `--name=value`; only the first `=` splits.
    Assign { name: &'a str, value: &'a str },
    /// `--name` with no value attached.
    Open { name: &'a str },
    /// Anything without a usable flag name.
    Bare(&'a str),
}

fn classify(fragment: &str) -> Fragment<'_> {
    let rest = fragment.trim_start_matches('-');
    if rest.len() == fragment.len() {
        return Fragment::Bare(fragment);
    }

    match rest.split_once('=') {
        Some(("", _)) => Fragment::Bare(fragment),
        Some((name, value)) => Fragment::Assign { name, value },
        None if rest.is_empty() => Fragment::Bare(fragment),
        None => Fragment::Open { name: rest },
    }
}

/// Parses a flag region into a name → values map.
///
/// Repeated flags accumulate values in order, whether written as
/// `--foo=bar` or `--foo bar`. A flag written without a value maps to an
/// empty list unless bare values follow it. Fragments made only of dashes
/// (`-`, `--`) carry no flag name and are handled as bare values.
///
/// # Errors
///
/// Returns [`InvalidFlagError`] if a quote is left open, or if a bare value
/// appears with no open flag to receive it (at the start of the region, or
/// right after a `--name=value` flag).
///
/// # Examples
///
/// ```
/// use cmdline_core::parse_flags;
///
/// let flags = parse_flags("--foo=bar --foo baz -v").unwrap();
/// assert_eq!(flags["foo"], vec!["bar", "baz"]);
/// assert!(flags["v"].is_empty());
///
/// let err = parse_flags("--foo=bar dist/*").unwrap_err();
/// assert_eq!(err.fragment(), "dist/*");
/// ```
pub fn parse_flags(region: &str) -> Result<FlagMap> {
    let mut flags = FlagMap::new();
    let mut cursor: Option<&str> = None;

    let fragments = split_fragments(region)?;
    for fragment in &fragments {
        let kind = classify(fragment);
        trace!(fragment = %fragment, kind = ?kind, "Classified flag fragment");

        match kind {
            Fragment::Assign { name, value } => {
                flags
                    .entry(name.to_string())
                    .or_default()
                    .push(value.to_string());
                cursor = None;
            }
            Fragment::Open { name } => {
                flags.entry(name.to_string()).or_default();
                cursor = Some(name);
            }
            Fragment::Bare(value) => {
                let Some(name) = cursor else {
                    return Err(InvalidFlagError::new(value));
                };
                flags
                    .entry(name.to_string())
                    .or_default()
                    .push(value.to_string());
            }
        }
    }

    Ok(flags)
}
