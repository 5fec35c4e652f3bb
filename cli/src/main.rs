mod config;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use cmdline_core::{
    OutputFormat, ParsedCommand, format_parsed, parse_cli, render, validate_parsed,
};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use config::CliConfig;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "CMDLINE_LOG";

#[derive(Debug, Parser)]
#[command(name = "cmdline-parse")]
#[command(about = "Parse shell-like command lines into command, args and flags")]
struct Cli {
    /// YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log debug events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse one command line and print its structure.
    Parse(ParseArgs),
    /// Parse one command line and print its canonical form.
    Normalize(NormalizeArgs),
    /// Render a parsed command (JSON or YAML) back into a command line.
    Render(RenderArgs),
    /// Parse every line of a file in parallel.
    Batch(BatchArgs),
    /// Write a configuration file with default settings.
    InitConfig(InitConfigArgs),
}

#[derive(Debug, Args)]
struct LineInput {
    /// Command line to parse, as a single argument.
    #[arg(allow_hyphen_values = true)]
    line: Option<String>,
    /// Read the command line from stdin.
    #[arg(long, conflicts_with = "line")]
    stdin: bool,
}

#[derive(Debug, Args)]
struct ParseArgs {
    #[command(flatten)]
    input: LineInput,
    /// Output format (default: from config, else json).
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Print JSON on a single line.
    #[arg(long)]
    compact: bool,
}

#[derive(Debug, Args)]
struct NormalizeArgs {
    #[command(flatten)]
    input: LineInput,
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// JSON or YAML file holding a parsed command (default: stdin).
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// File with one command line per line.
    #[arg(long)]
    input: PathBuf,
    /// Number of parallel parse jobs (default: from config).
    #[arg(long)]
    jobs: Option<usize>,
    /// Exit with an error if any line fails to parse.
    #[arg(long)]
    strict: bool,
    /// Output format (default: from config, else json).
    #[arg(long)]
    format: Option<OutputFormat>,
}

#[derive(Debug, Args)]
struct InitConfigArgs {
    /// Path of the configuration file to write.
    #[arg(long)]
    output: PathBuf,
    /// Overwrite an existing file.
    #[arg(long)]
    force: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Command::Parse(args) => run_parse(args, &config),
        Command::Normalize(args) => run_normalize(args),
        Command::Render(args) => run_render(args),
        Command::Batch(args) => run_batch(args, &config),
        Command::InitConfig(args) => run_init_config(args),
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<CliConfig, String> {
    let Some(path) = path else {
        return Ok(CliConfig::default());
    };
    let config = CliConfig::load(path)
        .map_err(|e| format!("Failed to load config '{}': {e}", path.display()))?;
    debug!(path = %path.display(), ?config, "Loaded configuration");
    Ok(config)
}

/// Reads the single command line to work on. Stdin may hold blank lines
/// around it, but more than one command line is an error (see `batch`).
fn read_line_input(input: LineInput) -> Result<String, String> {
    if input.stdin {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|err| format!("Failed to read stdin: {err}"))?;
        return single_line(&text);
    }
    input
        .line
        .ok_or_else(|| "Provide a command line argument or --stdin".to_string())
}

fn single_line(text: &str) -> Result<String, String> {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    match lines.as_slice() {
        [] => Ok(String::new()),
        [line] => Ok((*line).to_string()),
        _ => Err(format!(
            "Expected one command line on stdin, got {} (use `batch` for several)",
            lines.len()
        )),
    }
}

fn print_output(output: &str) {
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
}

// ---------------------------------------------------------------------------
// parse / normalize / render
// ---------------------------------------------------------------------------

fn run_parse(args: ParseArgs, config: &CliConfig) -> Result<(), String> {
    let line = read_line_input(args.input)?;
    let parsed = parse_cli(&line).map_err(|e| e.to_string())?;

    let format = args.format.unwrap_or(config.output.format);
    let pretty = config.output.pretty && !args.compact;
    print_output(&format_parsed(&parsed, format, pretty)?);
    Ok(())
}

fn run_normalize(args: NormalizeArgs) -> Result<(), String> {
    let line = read_line_input(args.input)?;
    let parsed = parse_cli(&line).map_err(|e| e.to_string())?;
    println!("{}", render(&parsed));
    Ok(())
}

fn run_render(args: RenderArgs) -> Result<(), String> {
    let parsed: ParsedCommand = match &args.input {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
            let is_json = path.extension().is_some_and(|ext| ext == "json");
            if is_json {
                serde_json::from_str(&text)
                    .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))?
            } else {
                serde_yaml::from_str(&text)
                    .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))?
            }
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|err| format!("Failed to read stdin: {err}"))?;
            serde_yaml::from_str(&text).map_err(|err| format!("Failed to parse stdin: {err}"))?
        }
    };

    let errors = validate_parsed(&parsed);
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(format!("Invalid parsed command: {}", messages.join("; ")));
    }

    println!("{}", render(&parsed));
    Ok(())
}

// ---------------------------------------------------------------------------
// batch
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct BatchEntry {
    /// 1-based line number in the input file.
    line: usize,
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parsed: Option<ParsedCommand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn run_batch(args: BatchArgs, config: &CliConfig) -> Result<(), String> {
    use rayon::prelude::*;

    let text = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;

    let skip_comments = config.batch.skip_comments;
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !(skip_comments && trimmed.starts_with('#'))
        })
        .collect();

    let jobs = args.jobs.unwrap_or(config.batch.jobs).max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|e| format!("Failed to create thread pool: {e}"))?;

    debug!(lines = lines.len(), jobs, "Parsing batch");

    let entries: Vec<BatchEntry> = pool.install(|| {
        lines
            .par_iter()
            .map(|&(line, input)| match parse_cli(input) {
                Ok(parsed) => BatchEntry {
                    line,
                    input: input.to_string(),
                    parsed: Some(parsed),
                    error: None,
                },
                Err(err) => BatchEntry {
                    line,
                    input: input.to_string(),
                    parsed: None,
                    error: Some(err.to_string()),
                },
            })
            .collect()
    });

    let failed = entries.iter().filter(|entry| entry.error.is_some()).count();
    info!(total = entries.len(), failed, "Batch parse finished");

    let format = args.format.unwrap_or(config.output.format);
    let output = match format {
        OutputFormat::Json if config.output.pretty => serde_json::to_string_pretty(&entries)
            .map_err(|e| format!("Failed to serialize output: {e}"))?,
        OutputFormat::Json => serde_json::to_string(&entries)
            .map_err(|e| format!("Failed to serialize output: {e}"))?,
        OutputFormat::Yaml => serde_yaml::to_string(&entries)
            .map_err(|e| format!("Failed to serialize output: {e}"))?,
        OutputFormat::Table => batch_to_table(&entries),
    };
    print_output(&output);

    if (args.strict || config.batch.strict) && failed > 0 {
        return Err(format!(
            "{failed} of {} lines failed to parse",
            entries.len()
        ));
    }
    Ok(())
}

fn batch_to_table(entries: &[BatchEntry]) -> String {
    let width = entries
        .iter()
        .map(|entry| entry.line.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for entry in entries {
        let (status, detail) = match (&entry.parsed, &entry.error) {
            (Some(parsed), _) => ("OK", render(parsed)),
            (None, Some(error)) => ("FAIL", error.clone()),
            (None, None) => ("FAIL", String::new()),
        };
        out.push_str(&format!(
            "{:>width$}  {status:<4}  {detail}\n",
            entry.line,
            width = width
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// init-config
// ---------------------------------------------------------------------------

fn run_init_config(args: InitConfigArgs) -> Result<(), String> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "'{}' already exists (use --force to overwrite)",
            args.output.display()
        ));
    }

    CliConfig::default()
        .save(&args.output)
        .map_err(|e| format!("Failed to write config '{}': {e}", args.output.display()))?;
    info!(path = %args.output.display(), "Wrote default configuration");
    Ok(())
}
