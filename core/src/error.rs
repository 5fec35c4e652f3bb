//! Error type for command line parsing.
//!
//! Parsing has a single failure mode: the flag region of the command line is
//! malformed. That happens when a quote is opened but never closed, or when a
//! bare value shows up with no preceding flag to attach it to.

use thiserror::Error;

/// A malformed flag region.
///
/// Carries the fragment that triggered the failure. For an unclosed quote this
/// is the partial fragment collected up to the end of input.
///
/// # Examples
///
/// ```
/// use cmdline_core::parse_cli;
///
/// let err = parse_cli("jest src/* --foo=bar dist/*").unwrap_err();
/// assert_eq!(err.fragment(), "dist/*");
/// assert_eq!(err.to_string(), "Invalid value for flag 'dist/*'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value for flag '{fragment}'")]
pub struct InvalidFlagError {
    fragment: String,
}

impl InvalidFlagError {
    /// Creates an error for the given offending fragment.
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }

    /// Returns the fragment that could not be parsed.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

/// Convenience alias for results with [`InvalidFlagError`].
pub type Result<T> = std::result::Result<T, InvalidFlagError>;
