//! Shell-like command line parsing.
//!
//! This crate turns a single command line string into a [`ParsedCommand`]:
//!
//! - [`command`](ParsedCommand::command) — the first whitespace-delimited token.
//! - [`args`](ParsedCommand::args) — positional arguments up to the first
//!   token that starts with `-`.
//! - [`flags`](ParsedCommand::flags) — flag names (without dashes) mapped to
//!   their values, in first-occurrence order.
//!
//! Flags may be written as `--name=value`, `--name value`, `-n=value` or
//! `-n value`. Repeated flags accumulate values, and a flag without a value
//! maps to an empty list. Single and double quotes group text containing
//! spaces, and a backslash escapes the next character.
//!
//! Parsing ([`parse_cli`]) is a pure function: no I/O, no shared state, safe
//! to call from any number of threads. The only failure is
//! [`InvalidFlagError`], raised for an unclosed quote or for a bare value with
//! no flag to attach to.
//!
//! Rendering ([`render`]) turns a [`ParsedCommand`] back into a canonical
//! command line that parses to the same value.
//!
//! This is not a shell: there is no globbing, variable substitution,
//! subshells, pipes or redirection.
//!
//! # Example
//!
//! ```
//! use cmdline_core::*;
//!
//! let parsed = parse_cli("jest src/* -f -c d -a=b --foo='escaped\\'quote'").unwrap();
//! assert_eq!(parsed.command, "jest");
//! assert_eq!(parsed.args, vec!["src/*"]);
//! assert!(parsed.flags["f"].is_empty());
//! assert_eq!(parsed.flags["c"], vec!["d"]);
//! assert_eq!(parsed.flags["a"], vec!["b"]);
//! assert_eq!(parsed.flags["foo"], vec!["escaped'quote"]);
//!
//! let err = parse_cli("jest src/* --foo=bar dist/*").unwrap_err();
//! assert_eq!(err.to_string(), "Invalid value for flag 'dist/*'");
//! ```

mod error;
mod flags;
mod output;
mod parser;
mod render;
mod tokenizer;
mod types;
mod validate;

pub use error::{InvalidFlagError, Result};
pub use flags::parse_flags;
pub use output::{OutputFormat, format_parsed, parsed_to_table};
pub use parser::parse_cli;
pub use render::render;
pub use tokenizer::split_fragments;
pub use types::{FlagMap, ParsedCommand};
pub use validate::{ValidationError, validate_parsed};
