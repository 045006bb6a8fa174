//! Command-line definition for `pyoutline`.

use std::path::PathBuf;

use clap::Parser;

/// Print a JSON outline of a Python source file
#[derive(Parser, Debug)]
#[command(name = "pyoutline")]
#[command(version)]
#[command(about = "Extract imports, classes, functions and constants from a Python file as JSON")]
pub struct Cli {
    /// Python source file to outline
    pub file: PathBuf,

    /// Enable debug output to stderr
    #[arg(short, long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_file_argument() {
        let cli = Cli::try_parse_from(["pyoutline", "src/app.py"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("src/app.py"));
        assert!(!cli.debug);
    }

    #[test]
    fn test_parse_debug_flag() {
        let cli = Cli::try_parse_from(["pyoutline", "--debug", "app.py"]).unwrap();
        assert!(cli.debug);
    }

    #[test]
    fn test_file_is_required() {
        let error = Cli::try_parse_from(["pyoutline"]).unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
