use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cmdline-parse"));
    cmd.env_remove("CMDLINE_LOG");
    cmd
}

fn run(args: &[&str]) -> Output {
    bin().args(args).output().expect("failed to run cmdline-parse")
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = bin()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn cmdline-parse");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait on cmdline-parse")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write fixture");
    path.to_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_json_structure() {
    let output = run(&["parse", "jest src/* --foo bar --foo=baz -f"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["command"], "jest");
    assert_eq!(json["args"], serde_json::json!(["src/*"]));
    assert_eq!(json["flags"]["foo"], serde_json::json!(["bar", "baz"]));
    assert_eq!(json["flags"]["f"], serde_json::json!([]));
}

#[test]
fn parse_compact_prints_single_line() {
    let output = run(&["parse", "--compact", "jest --foo="]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "{\"command\":\"jest\",\"args\":[],\"flags\":{\"foo\":[\"\"]}}\n"
    );
}

#[test]
fn parse_invalid_flag_exits_with_error() {
    let output = run(&["parse", "jest src/* -f 'as"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: Invalid value for flag 'as'"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn parse_reads_stdin() {
    let output = run_with_stdin(&["parse", "--stdin", "--format", "table"], "jest src/* -c d\n");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Command: jest\n\nArgs:\n  src/*\n\nFlags:\n  c  \"d\"\n"
    );
}

#[test]
fn parse_stdin_rejects_several_lines() {
    let output = run_with_stdin(&["parse", "--stdin"], "jest\nnpm test\n");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("got 2"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn parse_without_input_fails() {
    let output = run(&["parse"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("--stdin"));
}

// ---------------------------------------------------------------------------
// normalize / render
// ---------------------------------------------------------------------------

#[test]
fn normalize_prints_canonical_form() {
    let output = run(&["normalize", "jest  src/*  --foo=bar -f --msg \"a b\" --foo baz"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "jest src/* --foo bar --foo baz -f --msg 'a b'\n"
    );
}

#[test]
fn render_reads_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "parsed.json",
        r#"{"command":"jest","args":["src/*"],"flags":{"foo":["bar",""],"v":[]}}"#,
    );

    let output = run(&["render", "--input", &input]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "jest src/* --foo bar --foo= -v\n");
}

#[test]
fn render_reads_yaml_from_stdin() {
    let yaml = "command: git\nargs: [commit]\nflags:\n  m: [\"fix it\"]\n";
    let output = run_with_stdin(&["render"], yaml);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "git commit -m 'fix it'\n");
}

#[test]
fn render_rejects_invalid_structure() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "bad.json",
        r#"{"command":"jest","args":[],"flags":{"--foo":["bar"]}}"#,
    );

    let output = run(&["render", "--input", &input]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid flag name"));
}

#[test]
fn render_keeps_space_runs_and_rejects_tabs() {
    let yaml = "command: echo\nflags:\n  msg: [\"a  b\"]\n";
    let output = run_with_stdin(&["render"], yaml);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "echo --msg 'a\\ \\ b'\n");

    let normalized = run(&["normalize", stdout(&output).trim_end()]);
    assert_eq!(stdout(&normalized), stdout(&output));

    let yaml = "command: echo\nflags:\n  t: [\"x\\ty\"]\n";
    let output = run_with_stdin(&["render"], yaml);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid value for flag \"t\""));
}

// ---------------------------------------------------------------------------
// batch
// ---------------------------------------------------------------------------

const BATCH_INPUT: &str = "\
# test commands
jest src/* --foo bar

jest src/* -f 'as
cargo test --release -- --nocapture
";

#[test]
fn batch_reports_each_line_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "commands.txt", BATCH_INPUT);

    let output = run(&["batch", "--input", &input, "--jobs", "2"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let entries: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 3);

    assert_eq!(entries[0]["line"], 2);
    assert_eq!(entries[0]["parsed"]["flags"]["foo"], serde_json::json!(["bar"]));

    assert_eq!(entries[1]["line"], 4);
    assert_eq!(entries[1]["error"], "Invalid value for flag 'as'");
    assert!(entries[1].get("parsed").is_none());

    assert_eq!(entries[2]["line"], 5);
    assert_eq!(entries[2]["parsed"]["args"], serde_json::json!(["test"]));
    // A bare `--` has no flag name, so it becomes a value of the open flag.
    assert_eq!(entries[2]["parsed"]["flags"]["release"], serde_json::json!(["--"]));
    assert_eq!(entries[2]["parsed"]["flags"]["nocapture"], serde_json::json!([]));
}

#[test]
fn batch_strict_fails_when_a_line_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "commands.txt", BATCH_INPUT);

    let output = run(&["batch", "--input", &input, "--strict", "--format", "table"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("FAIL  Invalid value for flag 'as'"));
    assert!(stderr(&output).contains("1 of 3 lines failed to parse"));
}

#[test]
fn batch_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    let output = run(&["batch", "--input", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to read"));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn init_config_writes_defaults_and_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cmdline.yml");
    let path = path.to_str().unwrap();

    let output = run(&["init-config", "--output", path]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let written = fs::read_to_string(path).unwrap();
    assert!(written.contains("format: json"));
    assert!(written.contains("jobs: 4"));

    let again = run(&["init-config", "--output", path]);
    assert_eq!(again.status.code(), Some(1));
    assert!(stderr(&again).contains("already exists"));

    let forced = run(&["init-config", "--output", path, "--force"]);
    assert!(forced.status.success());
}

#[test]
fn config_sets_default_output_format() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "cmdline.yml", "output:\n  format: yaml\n");

    let output = run(&["--config", &config, "parse", "jest --foo bar"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("command: jest"));

    let overridden = run(&["--config", &config, "parse", "--format", "json", "jest"]);
    assert!(overridden.status.success());
    assert!(stdout(&overridden).trim_start().starts_with('{'));
}

#[test]
fn invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "cmdline.yml", "output:\n  format: xml\n");

    let output = run(&["--config", &config, "parse", "jest"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to load config"));
}
