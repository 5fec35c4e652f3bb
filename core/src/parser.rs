//! Top-level command line parsing.

use tracing::{debug, warn};

use crate::error::Result;
use crate::flags::parse_flags;
use crate::types::ParsedCommand;

/// Parses a command line into its command name, positional arguments and flags.
///
/// The input is split on runs of whitespace. The first token is the command;
/// following tokens are positional arguments up to the first token starting
/// with `-`. Everything from that token on is the flag region, rejoined with
/// single spaces and handed to [`parse_flags`]. Once the flag region starts,
/// no later token is a positional argument again.
///
/// Blank input yields an empty [`ParsedCommand`] and never fails.
///
/// A command line whose first token starts with `-` (for example
/// `"--foo bar"`) is not supported. The token is kept verbatim as the command
/// and no attempt is made to recover the intended structure.
///
/// # Errors
///
/// Returns [`InvalidFlagError`](crate::InvalidFlagError) if the flag region
/// has an unclosed quote or a bare value with no flag to attach to.
///
/// # Examples
///
/// ```
/// use cmdline_core::parse_cli;
///
/// let parsed = parse_cli("jest src/* --foo bar --foo=baz").unwrap();
/// assert_eq!(parsed.command, "jest");
/// assert_eq!(parsed.args, vec!["src/*"]);
/// assert_eq!(parsed.flags["foo"], vec!["bar", "baz"]);
///
/// assert!(parse_cli("").unwrap().is_empty());
/// assert!(parse_cli("jest src/* -f 'as").is_err());
/// ```
pub fn parse_cli(input: &str) -> Result<ParsedCommand> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let Some((&command, rest)) = tokens.split_first() else {
        return Ok(ParsedCommand::default());
    };

    if command.starts_with('-') {
        warn!(command, "Command line starts with a flag; treating it as the command name");
    }

    let split_at = rest
        .iter()
        .position(|token| token.starts_with('-'))
        .unwrap_or(rest.len());
    let (args, region) = rest.split_at(split_at);
    let region = region.join(" ");

    debug!(command, args = ?args, region = %region, "Parsing command line");

    let flags = parse_flags(&region)?;

    Ok(ParsedCommand {
        command: command.to_string(),
        args: args.iter().map(|arg| arg.to_string()).collect(),
        flags,
    })
}
