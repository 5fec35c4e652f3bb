//! Output formatting for parsed command lines.

use serde::{Deserialize, Serialize};

use crate::types::ParsedCommand;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Table,
}

/// Formats a parsed command in the requested output format.
///
/// JSON is pretty-printed when `pretty` is set; the flag is ignored for the
/// other formats.
///
/// # Examples
///
/// ```
/// use cmdline_core::{OutputFormat, format_parsed, parse_cli};
///
/// let parsed = parse_cli("jest src/* --foo bar").unwrap();
/// let json = format_parsed(&parsed, OutputFormat::Json, false).unwrap();
/// assert_eq!(json, r#"{"command":"jest","args":["src/*"],"flags":{"foo":["bar"]}}"#);
/// ```
pub fn format_parsed(
    parsed: &ParsedCommand,
    format: OutputFormat,
    pretty: bool,
) -> Result<String, String> {
    match format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(parsed)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Json => {
            serde_json::to_string(parsed).map_err(|e| format!("JSON serialization failed: {e}"))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(parsed).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(parsed_to_table(parsed)),
    }
}

/// Renders a parsed command as an aligned plain-text table.
pub fn parsed_to_table(parsed: &ParsedCommand) -> String {
    let mut out = String::new();

    out.push_str(&format!("Command: {}\n", parsed.command));

    if !parsed.args.is_empty() {
        out.push_str("\nArgs:\n");
        for arg in &parsed.args {
            out.push_str(&format!("  {arg}\n"));
        }
    }

    if !parsed.flags.is_empty() {
        out.push_str("\nFlags:\n");
        let max_name = parsed.flags.keys().map(|k| k.chars().count()).max().unwrap_or(4);

        for (name, values) in &parsed.flags {
            let shown = if values.is_empty() {
                "(no value)".to_string()
            } else {
                values
                    .iter()
                    .map(|v| format!("{v:?}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            out.push_str(&format!("  {:<width$}  {shown}\n", name, width = max_name));
        }
    }

    out
}
