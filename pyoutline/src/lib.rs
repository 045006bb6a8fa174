//! Structural outlines of Python source files.
//!
//! An outline lists the modules a file imports and the classes, functions,
//! constants and variables it defines, each with its line range. Functions
//! carry a rendered signature and their `async`/decorator modifiers; classes
//! carry their nested definitions.
//!
//! # Quick Start
//!
//! ```rust
//! use pyoutline::{outline_source, SymbolKind};
//!
//! let source = "import os\n\ndef greet(name: str) -> str:\n    return name\n";
//! let outline = outline_source(source).unwrap();
//! assert_eq!(outline.imports, vec!["os"]);
//! assert_eq!(outline.symbols[0].kind, SymbolKind::Function);
//! assert_eq!(outline.symbols[0].signature.as_deref(), Some("(name: str) -> str"));
//! ```
//!
//! # Architecture
//!
//! - [`parser`] lowers the tree-sitter concrete tree into the [`syntax`] model
//! - [`walker`] turns module statements into [`Symbol`]s
//! - [`imports`] gathers import paths from every nesting level
//! - [`builder`] ties parsing, walking and import collection together

pub mod builder;
pub mod decorators;
pub mod error;
pub mod imports;
pub mod literal;
pub mod parser;
pub mod signature;
mod structure;
pub mod syntax;
pub mod types;
pub mod unparse;
pub mod walker;

pub use builder::{build_outline, outline_file, outline_source};
pub use error::{ErrorCategory, OutlineError, Result, SyntaxError};
pub use parser::{parse_module, PythonParser};
pub use signature::{format_signature, Signature};
pub use types::{Outline, Symbol, SymbolKind};
