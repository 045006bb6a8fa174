//! Recursive decomposition of a module into outline symbols
//!
//! Only module scope is scanned for assignments. Class bodies contribute
//! nested class and function definitions; function bodies contribute nothing.

use crate::decorators::decorator_names;
use crate::signature::format_signature;
use crate::syntax::{ClassDef, FunctionDef, Module, Stmt, StmtKind};
use crate::types::{is_upper, Symbol, SymbolKind};
use tracing::{debug, trace};

/// Top-level symbols of a module, in declaration order
pub fn walk_module(module: &Module) -> Vec<Symbol> {
    let mut symbols = Vec::new();
    for (i, stmt) in module.body.iter().enumerate() {
        let end_line = estimate_end_line(stmt, module.body.get(i + 1));
        symbols.extend(module_symbols(stmt, end_line));
    }
    debug!(count = symbols.len(), "walked module");
    symbols
}

/// End line of a module-level statement.
///
/// An explicit end line always wins. Without one, the statement is assumed to
/// run up to the line before its next sibling, and the last statement ends on
/// its own start line. The estimate never precedes the start line.
pub fn estimate_end_line(stmt: &Stmt, next: Option<&Stmt>) -> usize {
    match (stmt.end_line, next) {
        (Some(end_line), _) => end_line,
        (None, Some(next)) => next.start_line.saturating_sub(1).max(stmt.start_line),
        (None, None) => stmt.start_line,
    }
}

fn module_symbols(stmt: &Stmt, end_line: usize) -> Vec<Symbol> {
    match &stmt.kind {
        StmtKind::FunctionDef(function) => {
            vec![function_symbol(function, stmt.start_line, end_line)]
        }
        StmtKind::ClassDef(class) => vec![class_symbol(class, stmt.start_line, end_line)],
        StmtKind::Assign { targets } => {
            // Any non-name target disqualifies the whole statement
            if !targets.iter().all(|target| target.as_name().is_some()) {
                return Vec::new();
            }
            targets
                .iter()
                .filter_map(|target| target.as_name())
                .filter(|name| is_upper(name))
                .map(|name| located(name, SymbolKind::Constant, stmt.start_line, end_line))
                .collect()
        }
        StmtKind::AnnAssign { target, .. } => match target.as_name() {
            Some(name) => vec![located(
                name,
                SymbolKind::for_assigned_name(name),
                stmt.start_line,
                end_line,
            )],
            None => Vec::new(),
        },
        StmtKind::Import { .. }
        | StmtKind::ImportFrom { .. }
        | StmtKind::Compound { .. }
        | StmtKind::Other => Vec::new(),
    }
}

/// A nested class or function definition; other statements are skipped
fn member_symbol(stmt: &Stmt) -> Option<Symbol> {
    let end_line = stmt.end_line.unwrap_or(stmt.start_line);
    match &stmt.kind {
        StmtKind::FunctionDef(function) => {
            Some(function_symbol(function, stmt.start_line, end_line))
        }
        StmtKind::ClassDef(class) => Some(class_symbol(class, stmt.start_line, end_line)),
        _ => None,
    }
}

fn class_symbol(class: &ClassDef, start_line: usize, end_line: usize) -> Symbol {
    let children = class.body.iter().filter_map(member_symbol).collect();
    located(&class.name, SymbolKind::Class, start_line, end_line)
        .with_modifiers(decorator_names(&class.decorators))
        .with_children(children)
}

fn function_symbol(function: &FunctionDef, start_line: usize, end_line: usize) -> Symbol {
    let mut modifiers = Vec::new();
    if function.is_async {
        modifiers.push("async".to_string());
    }
    modifiers.extend(decorator_names(&function.decorators));

    located(&function.name, SymbolKind::Function, start_line, end_line)
        .with_signature(format_signature(function))
        .with_modifiers(modifiers)
}

fn located(name: &str, kind: SymbolKind, start_line: usize, end_line: usize) -> Symbol {
    trace!(name, ?kind, start_line, end_line, "symbol");
    Symbol::new(name, kind, start_line, end_line)
}
