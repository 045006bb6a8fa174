//! Outline construction from source text or files

use crate::error::{OutlineError, Result};
use crate::imports::collect_imports;
use crate::parser::parse_module;
use crate::syntax::Module;
use crate::types::Outline;
use crate::walker::walk_module;
use std::path::Path;
use tracing::debug;

/// Assemble the outline of an already parsed module
pub fn build_outline(module: &Module) -> Outline {
    Outline::new(collect_imports(module), walk_module(module))
}

/// Parse Python source text and build its outline
pub fn outline_source(source: &str) -> Result<Outline> {
    let module = parse_module(source)?;
    Ok(build_outline(&module))
}

/// Read a Python file and build its outline.
///
/// A path that does not exist fails with [`OutlineError::NotFound`]; any
/// other read failure, including non-UTF-8 content, surfaces as
/// [`OutlineError::Io`].
pub fn outline_file(path: impl AsRef<Path>) -> Result<Outline> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(OutlineError::NotFound(path.to_path_buf()));
    }

    debug!(path = %path.display(), "reading source");
    let source = std::fs::read_to_string(path)?;
    let outline = outline_source(&source)?;
    debug!(
        path = %path.display(),
        imports = outline.imports.len(),
        symbols = outline.symbols.len(),
        "built outline"
    );
    Ok(outline)
}
