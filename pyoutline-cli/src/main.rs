//! pyoutline - print the structural outline of a Python file as JSON.
//!
//! Usage: `pyoutline <FILE> [--debug]`
//!
//! The outline is written to stdout as indented JSON. Failures are written to
//! stdout as `{"error": "<message>"}`; diagnostics go to stderr.
//!
//! Exit codes:
//! - 0: Success
//! - 1: File missing, unreadable or not valid Python
//! - 2: Invalid command-line usage

use std::io::{self, Write};
use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;

/// Exit code returned when the outline could not be produced.
const ERROR_EXIT_CODE: i32 = 1;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("pyoutline=debug,pyoutline_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    std::process::exit(run(&cli.file));
}

/// Outline a file and write the result, returning the process exit code.
fn run(path: &Path) -> i32 {
    match render_outline(path) {
        Ok(json) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{json}") {
                tracing::error!("Failed to write outline: {}", e);
                return ERROR_EXIT_CODE;
            }
            0
        }
        Err(message) => {
            tracing::debug!(path = %path.display(), "{}", message);
            println!("{}", error_json(&message));
            ERROR_EXIT_CODE
        }
    }
}

fn render_outline(path: &Path) -> Result<String, String> {
    let outline = pyoutline::outline_file(path).map_err(|e| e.to_string())?;
    outline.to_json_pretty().map_err(|e| e.to_string())
}

/// Single-line error document, spaced the way Python's `json.dumps` writes it
fn error_json(message: &str) -> String {
    let value = serde_json::Value::String(message.to_string());
    format!("{{\"error\": {value}}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_json_is_single_line() {
        assert_eq!(
            error_json("File not found: a.py"),
            r#"{"error": "File not found: a.py"}"#
        );
    }

    #[test]
    fn test_error_json_escapes_quotes() {
        let rendered = error_json(r#"Syntax error: expected ")" (line 1, column 9)"#);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(
            value["error"],
            r#"Syntax error: expected ")" (line 1, column 9)"#
        );
    }

    #[test]
    fn test_render_outline_missing_file() {
        let message = render_outline(Path::new("does/not/exist.py")).unwrap_err();
        assert_eq!(message, "File not found: does/not/exist.py");
    }
}
