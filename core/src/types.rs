//! Parsed command line data model.
//!
//! [`ParsedCommand`] is a plain value produced by [`parse_cli`](crate::parse_cli).
//! It serializes with [`serde`], keeping flag keys in the order they first
//! appeared on the command line.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Flag name (without leading dashes) to the ordered values given for it.
///
/// Keys keep first-occurrence order. A flag given without a value maps to an
/// empty vector.
pub type FlagMap = IndexMap<String, Vec<String>>;

/// A command line split into command name, positional arguments and flags.
///
/// # Examples
///
/// ```
/// use cmdline_core::parse_cli;
///
/// let parsed = parse_cli("jest src/* -f -c d -a=b").unwrap();
/// assert_eq!(parsed.command, "jest");
/// assert_eq!(parsed.args, vec!["src/*"]);
/// assert!(parsed.flag("f").unwrap().is_empty());
/// assert_eq!(parsed.flag("c"), Some(&["d".to_string()][..]));
/// assert!(parsed.has_flag("a"));
/// assert!(!parsed.has_flag("z"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    /// First whitespace-delimited token (empty for blank input).
    pub command: String,
    /// Positional arguments between the command and the first flag.
    pub args: Vec<String>,
    /// Flag values keyed by flag name.
    pub flags: FlagMap,
}

impl ParsedCommand {
    /// Creates a parsed command with no arguments or flags.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            flags: FlagMap::new(),
        }
    }

    /// Adds a positional argument.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds a flag with the given values, appending if the flag already exists.
    pub fn with_flag<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags
            .entry(name.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Returns the values given for `name`, or `None` if the flag is absent.
    pub fn flag(&self, name: &str) -> Option<&[String]> {
        self.flags.get(name).map(Vec::as_slice)
    }

    /// Returns `true` if the flag appeared at least once.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Returns `true` for the result of parsing blank input.
    pub fn is_empty(&self) -> bool {
        self.command.is_empty() && self.args.is_empty() && self.flags.is_empty()
    }
}
