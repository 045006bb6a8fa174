//! Error types for outline extraction
//!
//! Every failure of a single outline invocation maps onto one of these
//! variants. None of them are retried; the CLI reports each as a single JSON
//! object and a nonzero exit status.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// Result type alias for outline operations
pub type Result<T> = std::result::Result<T, OutlineError>;

/// Location and description of the first syntax error in a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Human-readable description
    pub message: String,
    /// 1-based line of the offending token
    pub line: usize,
    /// 1-based column of the offending token
    pub column: usize,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (line {}, column {})",
            self.message, self.line, self.column
        )
    }
}

/// Broad class an [`OutlineError`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The requested path does not exist
    NotFound,
    /// The source text is not valid Python
    Parse,
    /// Anything else (I/O, parser setup)
    Unexpected,
}

/// Error types for outline operations
#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum OutlineError {
    /// File not found
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Source failed to parse
    #[error("Syntax error: {0}")]
    Syntax(SyntaxError),

    /// IO error while reading the source
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The Python grammar could not be loaded into the parser
    #[error("{0}")]
    Language(String),
}

impl OutlineError {
    /// Create a syntax error at a 1-based position
    pub fn syntax(message: impl Into<String>, line: usize, column: usize) -> Self {
        OutlineError::Syntax(SyntaxError {
            message: message.into(),
            line,
            column,
        })
    }

    /// Create a parser setup error
    pub fn language(message: impl Into<String>) -> Self {
        OutlineError::Language(message.into())
    }

    /// Which taxonomy class this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            OutlineError::NotFound(_) => ErrorCategory::NotFound,
            OutlineError::Syntax(_) => ErrorCategory::Parse,
            OutlineError::Io(_) | OutlineError::Language(_) => ErrorCategory::Unexpected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let error = OutlineError::NotFound(PathBuf::from("missing/module.py"));
        assert_eq!(error.to_string(), "File not found: missing/module.py");
        assert_eq!(error.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn test_syntax_message_includes_position() {
        let error = OutlineError::syntax("invalid syntax", 3, 7);
        assert_eq!(
            error.to_string(),
            "Syntax error: invalid syntax (line 3, column 7)"
        );
        assert_eq!(error.category(), ErrorCategory::Parse);
    }

    #[test]
    fn test_unexpected_errors_render_bare_message() {
        let errors = vec![
            OutlineError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "stream did not contain valid UTF-8",
            )),
            OutlineError::language("incompatible grammar"),
        ];

        for error in errors {
            assert_eq!(
                error.category(),
                ErrorCategory::Unexpected,
                "Expected Unexpected category for: {}",
                error
            );
        }

        let error = OutlineError::language("incompatible grammar");
        assert_eq!(error.to_string(), "incompatible grammar");
    }
}
