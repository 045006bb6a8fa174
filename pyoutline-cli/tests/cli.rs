//! Command-line behavior of the `pyoutline` binary

use assert_cmd::Command;
use predicates::prelude::*;
use rstest::rstest;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn pyoutline() -> Command {
    let mut cmd = Command::cargo_bin("pyoutline").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_source(dir: &TempDir, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, source).unwrap();
    path
}

#[test]
fn test_outline_success() {
    let dir = TempDir::new().unwrap();
    let path = write_source(
        &dir,
        "app.py",
        "import os\n\nVERSION = \"1.0\"\n\ndef main(argv: list[str]) -> int:\n    return 0\n",
    );

    let output = pyoutline().arg(&path).assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.starts_with("{\n  \"imports\": [\n    \"os\"\n  ],"));
    assert!(stdout.ends_with("}\n"));

    let value: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        value,
        json!({
            "imports": ["os"],
            "symbols": [
                {"name": "VERSION", "kind": "constant", "startLine": 3, "endLine": 3},
                {
                    "name": "main",
                    "kind": "function",
                    "startLine": 5,
                    "endLine": 6,
                    "signature": "(argv: list[str]) -> int"
                }
            ]
        })
    );
}

#[test]
fn test_docstring_only_file() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "empty.py", "\"\"\"Nothing here.\"\"\"\n");

    pyoutline()
        .arg(&path)
        .assert()
        .success()
        .stdout("{\n  \"symbols\": []\n}\n");
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.py");

    pyoutline()
        .arg(&path)
        .assert()
        .code(1)
        .stdout(format!(
            "{{\"error\": \"File not found: {}\"}}\n",
            path.display()
        ));
}

#[test]
fn test_syntax_error() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "broken.py", "def broken(:\n    pass\n");

    let output = pyoutline().arg(&path).assert().code(1).get_output().stdout.clone();
    let value: Value = serde_json::from_slice(&output).unwrap();
    let message = value["error"].as_str().unwrap();
    assert!(message.starts_with("Syntax error: "), "{message}");
    assert!(value.get("symbols").is_none());
}

#[rstest]
#[case::unexpected_indent("X = 1\n  Y = 2\n", 2)]
#[case::unindent_mismatch("def f():\n        A = 1\n    B = 2\n", 3)]
#[case::missing_block("class A:\npass\n", 2)]
#[case::print_statement("print \"hello\"\n", 1)]
#[case::exec_statement("exec \"code\"\n", 1)]
#[case::parameter_after_kwargs("def f(**k, a): pass\n", 1)]
#[case::required_after_default("def f(a=1, b): pass\n", 1)]
fn test_invalid_python_is_rejected(#[case] source: &str, #[case] line: usize) {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "invalid.py", source);

    let output = pyoutline().arg(&path).assert().code(1).get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.starts_with("{\"error\": \"Syntax error: "), "{stdout}");
    assert!(stdout.contains(&format!("(line {line}, column ")), "{stdout}");
    assert!(!stdout.contains("symbols"), "{stdout}");
}

#[test]
fn test_directory_is_unexpected_error() {
    let dir = TempDir::new().unwrap();

    let output = pyoutline().arg(dir.path()).assert().code(1).get_output().stdout.clone();
    let value: Value = serde_json::from_slice(&output).unwrap();
    let message = value["error"].as_str().unwrap();
    assert!(!message.starts_with("File not found"));
    assert!(!message.starts_with("Syntax error"));
}

#[test]
fn test_missing_argument_prints_usage() {
    pyoutline()
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_debug_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "lib.py", "import sys\n");

    let output = pyoutline()
        .arg("--debug")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("built outline"))
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value, json!({ "imports": ["sys"], "symbols": [] }));
}
