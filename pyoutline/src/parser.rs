//! Tree-sitter based parsing of Python source into the typed syntax tree
//!
//! The concrete tree produced by `tree-sitter-python` is lowered into
//! [`Module`]. Lowering is lossy: only the constructs the outline
//! inspects keep their structure, everything else becomes
//! [`StmtKind::Other`] or [`Expr::Raw`].

use crate::error::{OutlineError, Result};
use crate::literal::{decode_escapes, normalize_float, normalize_int};
use crate::structure::check_structure;
use crate::syntax::{
    Argument, BinaryOperator, ClassDef, Constant, Expr, FunctionDef, Module, Param, Parameters,
    Stmt, StmtKind, UnaryOperator,
};
use tracing::debug;
use tree_sitter::{Node, Parser, Tree};

/// Python parser producing [`Module`] trees
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    /// Create a parser with the Python grammar loaded
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| OutlineError::language(format!("Failed to load Python grammar: {e}")))?;
        Ok(Self { parser })
    }

    /// Parse source text, failing on the first syntax error
    pub fn parse(&mut self, source: &str) -> Result<Module> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| OutlineError::language("Parser produced no syntax tree"))?;
        check_syntax(&tree)?;
        check_structure(tree.root_node(), source)?;

        let module = Lowering { source }.module(tree.root_node());
        debug!(statements = module.body.len(), "parsed module");
        Ok(module)
    }
}

/// Parse source text with a fresh parser
pub fn parse_module(source: &str) -> Result<Module> {
    PythonParser::new()?.parse(source)
}

fn check_syntax(tree: &Tree) -> Result<()> {
    let root = tree.root_node();
    if !root.has_error() {
        return Ok(());
    }

    let node = first_error(root).unwrap_or(root);
    let position = node.start_position();
    let message = if node.is_missing() {
        format!("expected '{}'", node.kind())
    } else {
        "invalid syntax".to_string()
    };
    debug!(
        line = position.row + 1,
        column = position.column + 1,
        "source failed to parse"
    );
    Err(OutlineError::syntax(
        message,
        position.row + 1,
        position.column + 1,
    ))
}

/// First ERROR or MISSING node in document order
fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Whether a node's span ends with a nested block
fn ends_with_block(kind: &str) -> bool {
    matches!(
        kind,
        "function_definition"
            | "class_definition"
            | "decorated_definition"
            | "if_statement"
            | "for_statement"
            | "while_statement"
            | "try_statement"
            | "with_statement"
            | "match_statement"
            | "block"
    ) || kind.ends_with("_clause")
}

/// 1-based last line of a node, ignoring trailing comments inside blocks
fn end_line(node: Node<'_>) -> usize {
    if ends_with_block(node.kind()) {
        let mut cursor = node.walk();
        let last = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .last();
        if let Some(last) = last {
            return end_line(last);
        }
    }

    let end = node.end_position();
    if end.column == 0 && end.row > node.start_position().row {
        end.row
    } else {
        end.row + 1
    }
}

fn start_line(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

pub(crate) fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

fn first_named_child<'t>(node: Node<'t>) -> Option<Node<'t>> {
    named_children(node).into_iter().next()
}

/// Collapse all whitespace runs so multi-line constructs render on one line
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

struct Lowering<'s> {
    source: &'s str,
}

impl<'s> Lowering<'s> {
    fn text(&self, node: Node<'_>) -> &'s str {
        self.source
            .get(node.start_byte()..node.end_byte())
            .unwrap_or_default()
    }

    fn field_text(&self, node: Node<'_>, field: &str) -> String {
        node.child_by_field_name(field)
            .map(|child| self.text(child).to_string())
            .unwrap_or_default()
    }

    fn raw(&self, node: Node<'_>) -> Expr {
        Expr::Raw(normalize_whitespace(self.text(node)))
    }

    fn module(&self, root: Node<'_>) -> Module {
        Module::new(self.statements(root))
    }

    /// Statements directly under a module or block
    fn statements(&self, parent: Node<'_>) -> Vec<Stmt> {
        named_children(parent)
            .into_iter()
            .filter_map(|child| self.statement(child))
            .collect()
    }

    fn located(&self, node: Node<'_>, kind: StmtKind) -> Stmt {
        Stmt::new(kind, start_line(node), end_line(node))
    }

    fn statement(&self, node: Node<'_>) -> Option<Stmt> {
        let stmt = match node.kind() {
            "comment" => return None,
            "function_definition" => {
                let function = self.function(node, Vec::new());
                self.located(node, StmtKind::FunctionDef(function))
            }
            "class_definition" => {
                let class = self.class(node, Vec::new());
                self.located(node, StmtKind::ClassDef(class))
            }
            "decorated_definition" => {
                let decorators = self.decorators(node);
                let definition = node.child_by_field_name("definition")?;
                let kind = match definition.kind() {
                    "function_definition" => {
                        StmtKind::FunctionDef(self.function(definition, decorators))
                    }
                    "class_definition" => StmtKind::ClassDef(self.class(definition, decorators)),
                    _ => StmtKind::Other,
                };
                // Python reports decorated definitions at their `def`/`class` line
                self.located(definition, kind)
            }
            "expression_statement" => {
                let kind = match first_named_child(node) {
                    Some(child) if child.kind() == "assignment" => self.assignment(child),
                    _ => StmtKind::Other,
                };
                self.located(node, kind)
            }
            "import_statement" => {
                let names = named_children(node)
                    .into_iter()
                    .filter_map(|child| match child.kind() {
                        "dotted_name" => Some(self.dotted_name(child)),
                        "aliased_import" => child
                            .child_by_field_name("name")
                            .map(|name| self.dotted_name(name)),
                        _ => None,
                    })
                    .collect();
                self.located(node, StmtKind::Import { names })
            }
            "import_from_statement" => {
                let kind = match node.child_by_field_name("module_name") {
                    Some(module) => self.import_from(module),
                    None => StmtKind::ImportFrom {
                        module: None,
                        level: 0,
                    },
                };
                self.located(node, kind)
            }
            "future_import_statement" => self.located(
                node,
                StmtKind::ImportFrom {
                    module: Some("__future__".to_string()),
                    level: 0,
                },
            ),
            _ => {
                let body = self.nested_statements(node);
                let kind = if body.is_empty() {
                    StmtKind::Other
                } else {
                    StmtKind::Compound { body }
                };
                self.located(node, kind)
            }
        };
        Some(stmt)
    }

    /// Statements inside every block and clause of a compound statement
    fn nested_statements(&self, node: Node<'_>) -> Vec<Stmt> {
        let mut body = Vec::new();
        for child in named_children(node) {
            match child.kind() {
                "block" => {
                    for item in named_children(child) {
                        if item.kind().ends_with("_clause") {
                            body.extend(self.nested_statements(item));
                        } else if let Some(stmt) = self.statement(item) {
                            body.push(stmt);
                        }
                    }
                }
                kind if kind.ends_with("_clause") => body.extend(self.nested_statements(child)),
                _ => {}
            }
        }
        body
    }

    fn function(&self, node: Node<'_>, decorators: Vec<Expr>) -> FunctionDef {
        let mut cursor = node.walk();
        let is_async = node
            .children(&mut cursor)
            .any(|child| child.kind() == "async");

        FunctionDef {
            name: self.field_text(node, "name"),
            is_async,
            decorators,
            parameters: node
                .child_by_field_name("parameters")
                .map(|params| self.parameters(params))
                .unwrap_or_default(),
            returns: node
                .child_by_field_name("return_type")
                .map(|ty| self.type_expr(ty)),
            body: node
                .child_by_field_name("body")
                .map(|body| self.statements(body))
                .unwrap_or_default(),
        }
    }

    fn class(&self, node: Node<'_>, decorators: Vec<Expr>) -> ClassDef {
        ClassDef {
            name: self.field_text(node, "name"),
            decorators,
            body: node
                .child_by_field_name("body")
                .map(|body| self.statements(body))
                .unwrap_or_default(),
        }
    }

    fn decorators(&self, node: Node<'_>) -> Vec<Expr> {
        named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "decorator")
            .filter_map(first_named_child)
            .map(|expr| self.expr(expr))
            .collect()
    }

    fn parameters(&self, node: Node<'_>) -> Parameters {
        let mut params = Parameters::default();
        let mut keyword_only = false;

        for child in named_children(node) {
            let regular = match child.kind() {
                "identifier" => Some(Param::new(self.text(child))),
                "default_parameter" => Some(Param::new(self.field_text(child, "name"))),
                "typed_default_parameter" => {
                    let mut param = Param::new(self.field_text(child, "name"));
                    if let Some(ty) = child.child_by_field_name("type") {
                        param = param.with_annotation(self.type_expr(ty));
                    }
                    Some(param)
                }
                "typed_parameter" => {
                    let annotation = child
                        .child_by_field_name("type")
                        .map(|ty| self.type_expr(ty));
                    match first_named_child(child) {
                        Some(inner) if inner.kind() == "list_splat_pattern" => {
                            params.vararg = Some(Param {
                                name: self.splat_name(inner),
                                annotation,
                            });
                            keyword_only = true;
                            None
                        }
                        Some(inner) if inner.kind() == "dictionary_splat_pattern" => {
                            params.kwarg = Some(Param {
                                name: self.splat_name(inner),
                                annotation,
                            });
                            None
                        }
                        Some(inner) => Some(Param {
                            name: self.text(inner).to_string(),
                            annotation,
                        }),
                        None => None,
                    }
                }
                "list_splat_pattern" => {
                    params.vararg = Some(Param::new(self.splat_name(child)));
                    keyword_only = true;
                    None
                }
                "dictionary_splat_pattern" => {
                    params.kwarg = Some(Param::new(self.splat_name(child)));
                    None
                }
                "keyword_separator" => {
                    keyword_only = true;
                    None
                }
                "positional_separator" => {
                    params.posonly.append(&mut params.args);
                    None
                }
                _ => None,
            };

            if let Some(param) = regular {
                if keyword_only {
                    params.kwonly.push(param);
                } else {
                    params.args.push(param);
                }
            }
        }

        params
    }

    fn splat_name(&self, node: Node<'_>) -> String {
        first_named_child(node)
            .map(|name| self.text(name).to_string())
            .unwrap_or_default()
    }

    fn assignment(&self, node: Node<'_>) -> StmtKind {
        let Some(left) = node.child_by_field_name("left") else {
            return StmtKind::Other;
        };

        if let Some(ty) = node.child_by_field_name("type") {
            return StmtKind::AnnAssign {
                target: self.target(left),
                annotation: self.type_expr(ty),
            };
        }

        // `a = b = 1` nests the second assignment on the right-hand side
        let mut targets = vec![self.target(left)];
        let mut right = node.child_by_field_name("right");
        while let Some(chained) = right.filter(|r| r.kind() == "assignment") {
            match chained.child_by_field_name("left") {
                Some(target) => targets.push(self.target(target)),
                None => break,
            }
            right = chained.child_by_field_name("right");
        }

        StmtKind::Assign { targets }
    }

    /// Assignment target; `(x)` is the name `x`, not a one-element tuple
    fn target(&self, node: Node<'_>) -> Expr {
        match node.kind() {
            "parenthesized_expression" => match first_named_child(node) {
                Some(inner) => self.target(inner),
                None => self.raw(node),
            },
            "tuple_pattern" | "pattern_list" => {
                let elements = named_children(node);
                let mut cursor = node.walk();
                let has_comma = node.children(&mut cursor).any(|child| child.kind() == ",");
                match elements.as_slice() {
                    [single] if node.kind() == "tuple_pattern" && !has_comma => {
                        self.target(*single)
                    }
                    _ => Expr::Tuple(elements.into_iter().map(|e| self.target(e)).collect()),
                }
            }
            _ => self.expr(node),
        }
    }

    fn import_from(&self, module: Node<'_>) -> StmtKind {
        match module.kind() {
            "relative_import" => {
                let mut level = 0;
                let mut name = None;
                for child in named_children(module) {
                    match child.kind() {
                        "import_prefix" => {
                            level = self.text(child).chars().filter(|c| *c == '.').count()
                        }
                        "dotted_name" => name = Some(self.dotted_name(child)),
                        _ => {}
                    }
                }
                StmtKind::ImportFrom {
                    module: name,
                    level,
                }
            }
            _ => StmtKind::ImportFrom {
                module: Some(self.dotted_name(module)),
                level: 0,
            },
        }
    }

    fn dotted_name(&self, node: Node<'_>) -> String {
        let parts = named_children(node);
        if parts.is_empty() {
            return self.text(node).to_string();
        }
        parts
            .into_iter()
            .map(|part| self.text(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Lower a `type` node or any of the type-only forms it wraps
    fn type_expr(&self, node: Node<'_>) -> Expr {
        match node.kind() {
            "type" => match first_named_child(node) {
                Some(inner) => self.type_expr(inner),
                None => self.raw(node),
            },
            "generic_type" => {
                let children = named_children(node);
                let Some(base) = children.first() else {
                    return self.raw(node);
                };
                let arguments: Vec<Expr> = children
                    .iter()
                    .filter(|child| child.kind() == "type_parameter")
                    .flat_map(|params| named_children(*params))
                    .map(|ty| self.type_expr(ty))
                    .collect();
                Expr::subscript(self.type_expr(*base), Self::slice(arguments))
            }
            "union_type" => {
                let children = named_children(node);
                match children.as_slice() {
                    [left, right] => Expr::binop(
                        self.type_expr(*left),
                        BinaryOperator::BitOr,
                        self.type_expr(*right),
                    ),
                    _ => self.raw(node),
                }
            }
            "member_type" => {
                let children = named_children(node);
                match children.as_slice() {
                    [value, attr] => Expr::attribute(self.type_expr(*value), self.text(*attr)),
                    _ => self.raw(node),
                }
            }
            "splat_type" if !self.text(node).starts_with("**") => match first_named_child(node) {
                Some(name) => Expr::Starred(Box::new(self.expr(name))),
                None => self.raw(node),
            },
            "splat_type" | "constrained_type" => self.raw(node),
            _ => self.expr(node),
        }
    }

    /// A subscript slice: one element as-is, several as a tuple
    fn slice(mut elements: Vec<Expr>) -> Expr {
        if elements.len() == 1 {
            elements.remove(0)
        } else {
            Expr::Tuple(elements)
        }
    }

    fn expr(&self, node: Node<'_>) -> Expr {
        match node.kind() {
            "identifier" | "keyword_identifier" => Expr::name(self.text(node)),
            "attribute" => match node.child_by_field_name("object") {
                Some(object) => {
                    Expr::attribute(self.expr(object), self.field_text(node, "attribute"))
                }
                None => self.raw(node),
            },
            "call" => {
                let Some(function) = node.child_by_field_name("function") else {
                    return self.raw(node);
                };
                let args = match node.child_by_field_name("arguments") {
                    Some(arguments) if arguments.kind() == "argument_list" => {
                        named_children(arguments)
                            .into_iter()
                            .map(|arg| self.argument(arg))
                            .collect()
                    }
                    Some(generator) => {
                        let text = normalize_whitespace(self.text(generator));
                        let inner = text
                            .strip_prefix('(')
                            .and_then(|t| t.strip_suffix(')'))
                            .unwrap_or(&text)
                            .to_string();
                        vec![Argument::Positional(Expr::Raw(inner))]
                    }
                    None => Vec::new(),
                };
                Expr::call(self.expr(function), args)
            }
            "subscript" => {
                let Some(value) = node.child_by_field_name("value") else {
                    return self.raw(node);
                };
                let mut cursor = node.walk();
                let elements: Vec<Expr> = node
                    .children_by_field_name("subscript", &mut cursor)
                    .map(|element| self.expr(element))
                    .collect();
                Expr::subscript(self.expr(value), Self::slice(elements))
            }
            "parenthesized_expression" => match first_named_child(node) {
                // Python always parenthesizes these when unparsing them as operands
                Some(inner) if matches!(inner.kind(), "yield" | "named_expression") => {
                    Expr::Raw(format!("({})", normalize_whitespace(self.text(inner))))
                }
                Some(inner) => self.expr(inner),
                None => self.raw(node),
            },
            "tuple" | "expression_list" => Expr::Tuple(self.exprs(node)),
            "list" => Expr::List(self.exprs(node)),
            "binary_operator" => {
                let parts = (
                    node.child_by_field_name("left"),
                    node.child_by_field_name("operator")
                        .and_then(|op| BinaryOperator::from_token(op.kind())),
                    node.child_by_field_name("right"),
                );
                match parts {
                    (Some(left), Some(op), Some(right)) => {
                        Expr::binop(self.expr(left), op, self.expr(right))
                    }
                    _ => self.raw(node),
                }
            }
            "unary_operator" => {
                let op = node
                    .child_by_field_name("operator")
                    .and_then(|op| UnaryOperator::from_token(op.kind()));
                match (op, node.child_by_field_name("argument")) {
                    (Some(op), Some(argument)) => Expr::UnaryOp {
                        op,
                        operand: Box::new(self.expr(argument)),
                    },
                    _ => self.raw(node),
                }
            }
            "not_operator" => match node.child_by_field_name("argument") {
                Some(argument) => Expr::UnaryOp {
                    op: UnaryOperator::Not,
                    operand: Box::new(self.expr(argument)),
                },
                None => self.raw(node),
            },
            "list_splat" => match first_named_child(node) {
                Some(value) => Expr::Starred(Box::new(self.expr(value))),
                None => self.raw(node),
            },
            "string" => self.string(node),
            "concatenated_string" => {
                let mut joined = String::new();
                for part in named_children(node) {
                    match self.string(part) {
                        Expr::Constant(Constant::Str(value)) => joined.push_str(&value),
                        _ => return self.raw(node),
                    }
                }
                Expr::Constant(Constant::Str(joined))
            }
            "integer" => Expr::Constant(Constant::Int(normalize_int(self.text(node)))),
            "float" => Expr::Constant(Constant::Float(normalize_float(self.text(node)))),
            "true" => Expr::Constant(Constant::True),
            "false" => Expr::Constant(Constant::False),
            "none" => Expr::Constant(Constant::None),
            "ellipsis" => Expr::Constant(Constant::Ellipsis),
            _ => self.raw(node),
        }
    }

    fn exprs(&self, node: Node<'_>) -> Vec<Expr> {
        named_children(node)
            .into_iter()
            .map(|child| self.expr(child))
            .collect()
    }

    fn argument(&self, node: Node<'_>) -> Argument {
        match node.kind() {
            "keyword_argument" => match node.child_by_field_name("value") {
                Some(value) => Argument::Keyword {
                    name: self.field_text(node, "name"),
                    value: self.expr(value),
                },
                None => Argument::Positional(self.raw(node)),
            },
            "list_splat" => match first_named_child(node) {
                Some(value) => Argument::Unpacked(self.expr(value)),
                None => Argument::Positional(self.raw(node)),
            },
            "dictionary_splat" => match first_named_child(node) {
                Some(value) => Argument::KeywordUnpacked(self.expr(value)),
                None => Argument::Positional(self.raw(node)),
            },
            _ => Argument::Positional(self.expr(node)),
        }
    }

    /// Plain and raw string literals decode to their value; byte strings,
    /// f-strings and t-strings keep their source text
    fn string(&self, node: Node<'_>) -> Expr {
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        let start = children.iter().find(|c| c.kind() == "string_start");
        let end = children.iter().rev().find(|c| c.kind() == "string_end");
        let (Some(start), Some(end)) = (start, end) else {
            return self.raw(node);
        };

        let prefix = self
            .text(*start)
            .trim_end_matches(['"', '\''])
            .to_ascii_lowercase();
        if prefix.contains(['b', 'f', 't']) {
            return self.raw(node);
        }

        let body = self
            .source
            .get(start.end_byte()..end.start_byte())
            .unwrap_or_default();
        let value = if prefix.contains('r') {
            body.to_string()
        } else {
            decode_escapes(body)
        };
        Expr::Constant(Constant::Str(value))
    }
}
