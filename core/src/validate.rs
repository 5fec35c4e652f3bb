//! Structural validation of parsed commands.
//!
//! [`parse_cli`](crate::parse_cli) always produces values that pass these
//! checks. Validation matters for values built by hand or deserialized from
//! JSON/YAML before they are rendered back into a command line.
//!
//! # Examples
//!
//! ```
//! use cmdline_core::*;
//!
//! let parsed = parse_cli("jest src/* --foo bar").unwrap();
//! assert!(validate_parsed(&parsed).is_empty());
//!
//! // Invalid: flag name keeps its leading dash
//! let bad = ParsedCommand::new("jest").with_flag("--foo", ["bar"]);
//! assert!(!validate_parsed(&bad).is_empty());
//! ```

use thiserror::Error;

use crate::ParsedCommand;

/// Parsed command validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Command name contains whitespace or starts with `-`.
    #[error("invalid command name: {0:?}")]
    InvalidCommand(String),
    /// Arguments or flags are present without a command.
    #[error("arguments or flags given without a command")]
    MissingCommand,
    /// Positional argument is empty, contains whitespace or starts with `-`.
    #[error("invalid positional argument: {0:?}")]
    InvalidArg(String),
    /// Flag name is empty.
    #[error("flag name cannot be empty")]
    EmptyFlagName,
    /// Flag name starts with a dash, contains `=` or whitespace other than
    /// a plain space.
    #[error("invalid flag name: {0:?}")]
    InvalidFlagName(String),
    /// Flag value contains whitespace other than a plain space.
    #[error("invalid value for flag {name:?}: {value:?}")]
    InvalidFlagValue { name: String, value: String },
}

/// Tabs, newlines and other non-space whitespace do not survive rendering.
fn has_unrenderable_whitespace(text: &str) -> bool {
    text.chars().any(|ch| ch.is_whitespace() && ch != ' ')
}

/// Validates a parsed command.
///
/// Checks that arguments and flags only appear with a command, that the
/// command and positional arguments are single whitespace-free tokens that do
/// not look like flags, that flag names are non-empty with no leading dash and
/// no `=`, and that flag names and values hold no whitespace besides spaces.
/// Validation stops at the first problem found.
pub fn validate_parsed(parsed: &ParsedCommand) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if parsed.command.is_empty() {
        if !parsed.args.is_empty() || !parsed.flags.is_empty() {
            errors.push(ValidationError::MissingCommand);
        }
        return errors;
    }

    if parsed.command.starts_with('-') || parsed.command.chars().any(char::is_whitespace) {
        errors.push(ValidationError::InvalidCommand(parsed.command.clone()));
        return errors;
    }

    for arg in &parsed.args {
        if arg.is_empty() || arg.starts_with('-') || arg.chars().any(char::is_whitespace) {
            errors.push(ValidationError::InvalidArg(arg.clone()));
            return errors;
        }
    }

    for (name, values) in &parsed.flags {
        if name.is_empty() {
            errors.push(ValidationError::EmptyFlagName);
            return errors;
        }
        if name.starts_with('-') || name.contains('=') || has_unrenderable_whitespace(name) {
            errors.push(ValidationError::InvalidFlagName(name.clone()));
            return errors;
        }
        if let Some(value) = values.iter().find(|v| has_unrenderable_whitespace(v)) {
            errors.push(ValidationError::InvalidFlagValue {
                name: name.clone(),
                value: value.clone(),
            });
            return errors;
        }
    }

    errors
}
