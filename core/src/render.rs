//! Canonical command line rendering.
//!
//! Turns a [`ParsedCommand`] back into text that [`parse_cli`](crate::parse_cli)
//! reads as the same structure. Flags are grouped by name in key order and
//! each value gets its own occurrence of the flag.

use std::fmt;

use crate::types::ParsedCommand;

/// Renders a parsed command as a canonical command line.
///
/// One-character flag names use a single dash, longer names use two. Values
/// are written as `--name value`, or `--name=value` when the value is empty
/// or starts with `-`. Anything containing spaces, quotes or backslashes is
/// single-quoted with `'` and `\` escaped, and runs of spaces escaped too.
///
/// # Examples
///
/// ```
/// use cmdline_core::{parse_cli, render};
///
/// let parsed = parse_cli("jest src/* -f --foo=bar --msg 'hello world' --foo baz").unwrap();
/// assert_eq!(
///     render(&parsed),
///     "jest src/* -f --foo bar --foo baz --msg 'hello world'"
/// );
/// assert_eq!(parse_cli(&render(&parsed)).unwrap(), parsed);
/// ```
pub fn render(parsed: &ParsedCommand) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(1 + parsed.args.len() + parsed.flags.len());

    if !parsed.command.is_empty() {
        parts.push(parsed.command.clone());
    }
    parts.extend(parsed.args.iter().cloned());

    for (name, values) in &parsed.flags {
        let dashes = if name.chars().count() == 1 { "-" } else { "--" };
        let flag = format!("{dashes}{}", quote(name));

        if values.is_empty() {
            parts.push(flag);
            continue;
        }

        for value in values {
            if value.is_empty() {
                parts.push(format!("{flag}="));
            } else if value.starts_with('-') {
                parts.push(format!("{flag}={}", quote(value)));
            } else {
                parts.push(format!("{flag} {}", quote(value)));
            }
        }
    }

    parts.join(" ")
}

fn needs_quoting(text: &str) -> bool {
    text.chars()
        .any(|ch| ch.is_whitespace() || matches!(ch, '\'' | '"' | '\\'))
}

/// Quotes `text` so the tokenizer reads it back as one literal piece.
///
/// Spaces inside a run of two or more are backslash-escaped: `parse_cli`
/// collapses whitespace runs before tokenizing, and each escaped space
/// survives that as its own token.
fn quote(text: &str) -> String {
    if !text.is_empty() && !needs_quoting(text) {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for (idx, &ch) in chars.iter().enumerate() {
        let in_space_run = ch == ' '
            && (idx > 0 && chars[idx - 1] == ' ' || chars.get(idx + 1) == Some(&' '));
        if matches!(ch, '\'' | '\\') || in_space_run {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

impl ParsedCommand {
    /// Renders this command as a canonical command line. See [`render`].
    pub fn to_command_line(&self) -> String {
        render(self)
    }
}

impl fmt::Display for ParsedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
