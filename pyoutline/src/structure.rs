//! Checks for source the tree-sitter grammar accepts but Python rejects
//!
//! The grammar is tolerant of inconsistent indentation, Python 2 statements
//! and out-of-order parameters. Each is reported as a syntax error at the
//! offending node, using the interpreter's wording.

use crate::error::{OutlineError, Result};
use crate::parser::named_children;
use tree_sitter::Node;

const UNEXPECTED_INDENT: &str = "unexpected indent";
const UNINDENT_MISMATCH: &str = "unindent does not match any outer indentation level";
const EXPECTED_BLOCK: &str = "expected an indented block";

/// Reject the first construct in `root` that Python would not compile
pub(crate) fn check_structure(root: Node<'_>, source: &str) -> Result<()> {
    let checker = StructureChecker { source };
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        checker.check_node(node)?;

        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    Ok(())
}

fn error_at(node: Node<'_>, message: &str) -> OutlineError {
    let position = node.start_position();
    OutlineError::syntax(message, position.row + 1, position.column + 1)
}

/// How a single entry of a parameter list binds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamShape {
    Required,
    Defaulted,
    Star,
    DoubleStar,
    Slash,
    Other,
}

impl ParamShape {
    fn of(node: Node<'_>) -> Self {
        match node.kind() {
            "identifier" => Self::Required,
            "default_parameter" | "typed_default_parameter" => Self::Defaulted,
            "list_splat_pattern" | "keyword_separator" => Self::Star,
            "dictionary_splat_pattern" => Self::DoubleStar,
            "positional_separator" => Self::Slash,
            "typed_parameter" => match named_children(node).first().map(|inner| inner.kind()) {
                Some("list_splat_pattern") => Self::Star,
                Some("dictionary_splat_pattern") => Self::DoubleStar,
                _ => Self::Required,
            },
            _ => Self::Other,
        }
    }
}

struct StructureChecker<'s> {
    source: &'s str,
}

impl StructureChecker<'_> {
    fn check_node(&self, node: Node<'_>) -> Result<()> {
        match node.kind() {
            "module" => self.check_module(node),
            "block" => self.check_block(node),
            "print_statement" => Err(error_at(
                node,
                "Missing parentheses in call to 'print'. Did you mean print(...)?",
            )),
            "exec_statement" => Err(error_at(
                node,
                "Missing parentheses in call to 'exec'. Did you mean exec(...)?",
            )),
            "parameters" | "lambda_parameters" => check_parameters(node),
            _ => Ok(()),
        }
    }

    /// Indentation width of a node that begins its line, `None` when other
    /// code precedes it on the same line. A form feed resets the width.
    fn indentation(&self, node: Node<'_>) -> Option<usize> {
        let start = node.start_byte();
        let line_start = start.saturating_sub(node.start_position().column);
        let prefix = self.source.get(line_start..start)?;
        if !prefix.chars().all(char::is_whitespace) {
            return None;
        }
        Some(prefix.rsplit('\x0c').next().map_or(0, str::len))
    }

    fn check_module(&self, module: Node<'_>) -> Result<()> {
        match named_children(module)
            .into_iter()
            .find(|stmt| self.indentation(*stmt).is_some_and(|width| width != 0))
        {
            Some(stmt) => Err(error_at(stmt, UNEXPECTED_INDENT)),
            None => Ok(()),
        }
    }

    fn check_block(&self, block: Node<'_>) -> Result<()> {
        let header = block.parent().unwrap_or(block);
        let header_row = match block.prev_sibling() {
            Some(colon) if colon.kind() == ":" => colon.end_position().row,
            _ => header.start_position().row,
        };

        let statements = named_children(block);
        let Some(first) = statements.first() else {
            return Err(OutlineError::syntax(EXPECTED_BLOCK, header_row + 2, 1));
        };
        // A suite on the header line (`if x: pass`) carries no indentation
        if first.start_position().row == header_row {
            return Ok(());
        }

        let header_indent = self
            .indentation(header)
            .unwrap_or(header.start_position().column);
        let indent = self
            .indentation(*first)
            .unwrap_or(first.start_position().column);
        if indent <= header_indent {
            return Err(error_at(*first, EXPECTED_BLOCK));
        }

        for stmt in statements.iter().skip(1) {
            match self.indentation(*stmt) {
                Some(width) if width > indent => {
                    return Err(error_at(*stmt, UNEXPECTED_INDENT));
                }
                Some(width) if width < indent => {
                    return Err(error_at(*stmt, UNINDENT_MISMATCH));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn check_parameters(parameters: Node<'_>) -> Result<()> {
    let mut defaulted = false;
    let mut keyword_only = false;
    let mut after_kwargs = false;

    for param in named_children(parameters) {
        if after_kwargs {
            return Err(error_at(param, "arguments cannot follow var-keyword argument"));
        }
        match ParamShape::of(param) {
            ParamShape::Required if defaulted && !keyword_only => {
                return Err(error_at(
                    param,
                    "parameter without a default follows parameter with a default",
                ));
            }
            ParamShape::Defaulted => defaulted = true,
            ParamShape::Star if keyword_only => {
                return Err(error_at(param, "* argument may appear only once"));
            }
            ParamShape::Star => keyword_only = true,
            ParamShape::Slash if keyword_only => {
                return Err(error_at(param, "/ must be ahead of *"));
            }
            ParamShape::DoubleStar => after_kwargs = true,
            ParamShape::Required | ParamShape::Slash | ParamShape::Other => {}
        }
    }
    Ok(())
}
