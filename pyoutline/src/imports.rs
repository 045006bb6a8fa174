//! Collection of imported module paths from every nesting level

use crate::syntax::{Module, Stmt, StmtKind};
use std::collections::BTreeSet;
use tracing::debug;

/// Every imported module path in the tree, deduplicated and sorted.
///
/// Relative imports are prefixed with one `.` per level, so they sort before
/// absolute module names.
pub fn collect_imports(module: &Module) -> Vec<String> {
    let mut imports = BTreeSet::new();
    collect_into(&module.body, &mut imports);
    debug!(count = imports.len(), "collected imports");
    imports.into_iter().collect()
}

fn collect_into(body: &[Stmt], imports: &mut BTreeSet<String>) {
    for stmt in body {
        match &stmt.kind {
            StmtKind::Import { names } => imports.extend(names.iter().cloned()),
            StmtKind::ImportFrom { module, level } => {
                let mut path = ".".repeat(*level);
                if let Some(module) = module {
                    path.push_str(module);
                }
                imports.insert(path);
            }
            StmtKind::FunctionDef(function) => collect_into(&function.body, imports),
            StmtKind::ClassDef(class) => collect_into(&class.body, imports),
            StmtKind::Compound { body } => collect_into(body, imports),
            StmtKind::Assign { .. } | StmtKind::AnnAssign { .. } | StmtKind::Other => {}
        }
    }
}
