//! Decorator name extraction

use crate::syntax::Expr;

/// Reduce a decorator expression to its name or dotted path.
///
/// Calls reduce to their callee with the arguments discarded. Any other
/// expression form has no name and yields `None`.
pub fn decorator_name(decorator: &Expr) -> Option<String> {
    match decorator {
        Expr::Name(id) => Some(id.clone()),
        Expr::Attribute { .. } => Some(decorator.to_string()),
        Expr::Call { func, .. } => decorator_name(func),
        _ => None,
    }
}

/// Names of every nameable decorator, in source order
pub fn decorator_names(decorators: &[Expr]) -> Vec<String> {
    decorators.iter().filter_map(decorator_name).collect()
}
