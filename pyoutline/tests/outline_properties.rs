//! End-to-end outline behavior over real Python source

use pyoutline::{outline_source, Outline, SymbolKind};
use rstest::rstest;
use serde_json::{json, Value};

fn outline(source: &str) -> Outline {
    outline_source(source).unwrap()
}

fn to_value(outline: &Outline) -> Value {
    serde_json::to_value(outline).unwrap()
}

#[test]
fn test_docstring_only_module() {
    let outline = outline("\"\"\"Utilities for nothing in particular.\"\"\"\n");
    assert_eq!(to_value(&outline), json!({ "symbols": [] }));
    assert_eq!(outline.to_json_pretty().unwrap(), "{\n  \"symbols\": []\n}");
}

#[test]
fn test_empty_file() {
    assert_eq!(to_value(&outline("")), json!({ "symbols": [] }));
}

#[test]
fn test_full_function_signature() {
    let outline = outline("def f(a, b: int, *args, **kwargs) -> dict:\n    return {}\n");
    assert_eq!(
        to_value(&outline),
        json!({
            "symbols": [{
                "name": "f",
                "kind": "function",
                "startLine": 1,
                "endLine": 2,
                "signature": "(a, b: int, *args, **kwargs) -> dict"
            }]
        })
    );
}

#[test]
fn test_class_children_in_declaration_order() {
    let source = r#"class Service:
    """Does work."""

    timeout = 5

    def start(self):
        pass

    def stop(self, force: bool = False) -> None:
        pass
"#;
    let outline = outline(source);
    assert_eq!(outline.symbols.len(), 1);

    let class = &outline.symbols[0];
    assert_eq!(class.kind, SymbolKind::Class);
    assert_eq!((class.start_line, class.end_line), (1, 10));

    let children: Vec<(&str, SymbolKind, usize, usize)> = class
        .children
        .iter()
        .map(|s| (s.name.as_str(), s.kind, s.start_line, s.end_line))
        .collect();
    assert_eq!(
        children,
        vec![
            ("start", SymbolKind::Function, 6, 7),
            ("stop", SymbolKind::Function, 9, 10),
        ]
    );
    assert_eq!(
        class.children[1].signature.as_deref(),
        Some("(self, force: bool) -> None")
    );
}

#[test]
fn test_imports_sorted_with_relative_first() {
    let bare = outline("import sys\nimport os\nfrom . import foo\n");
    // `from . import foo` names no module, so it contributes only the dot
    assert_eq!(bare.imports, vec![".", "os", "sys"]);

    let named = outline("import sys\nimport os\nfrom .foo import bar\n");
    assert_eq!(named.imports, vec![".foo", "os", "sys"]);
}

#[test]
fn test_imports_from_every_scope() {
    let source = r#"import os
from ..core.models import Base

def load():
    import json
    if True:
        from collections import OrderedDict

class Cache:
    def warm(self):
        import os
"#;
    assert_eq!(
        outline(source).imports,
        vec!["..core.models", "collections", "json", "os"]
    );
}

#[test]
fn test_output_is_deterministic() {
    let source = r#"import re
from typing import Optional

PATTERN: str = r"\d+"

@functools.lru_cache(maxsize=None)
def compile(pattern: Optional[str] = None) -> "re.Pattern[str]":
    return re.compile(pattern or PATTERN)
"#;
    let first = outline(source).to_json_pretty().unwrap();
    let second = outline(source).to_json_pretty().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_assignment_classification_asymmetry() {
    let outline = outline("MAX_ITEMS = 1000\ncount = 0\ntotal: int = 0\n");
    assert_eq!(
        to_value(&outline),
        json!({
            "symbols": [
                {"name": "MAX_ITEMS", "kind": "constant", "startLine": 1, "endLine": 1},
                {"name": "total", "kind": "variable", "startLine": 3, "endLine": 3}
            ]
        })
    );
}

#[rstest]
#[case("A = B = 1\n", vec!["A", "B"])]
#[case("A = b = 1\n", vec!["A"])]
#[case("A, B = 1, 2\n", vec![])]
#[case("(C) = 3\n", vec!["C"])]
#[case("((D)) = E = 4\n", vec!["D", "E"])]
#[case("(F,) = (5,)\n", vec![])]
#[case("(G): int = 6\n", vec!["G"])]
#[case("obj.LIMIT = 3\n", vec![])]
#[case("LIMIT: int\n", vec!["LIMIT"])]
#[case("if DEBUG:\n    LEVEL = 10\n", vec![])]
fn test_module_assignments(#[case] source: &str, #[case] expected: Vec<&str>) {
    let names: Vec<String> = outline(source).symbols.into_iter().map(|s| s.name).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_decorator_call_reduces_to_callee() {
    let source = r#"@app.route("/x")
def index():
    return "ok"
"#;
    let outline = outline(source);
    let index = &outline.symbols[0];
    assert_eq!(index.modifiers, vec!["app.route"]);
    assert_eq!((index.start_line, index.end_line), (2, 3));
}

#[test]
fn test_async_method_modifiers() {
    let source = r#"class Handler:
    @staticmethod
    @retry(times=3)
    async def fetch(url: str, *, timeout: float = 1.0) -> bytes:
        ...
"#;
    let outline = outline(source);
    let fetch = &outline.symbols[0].children[0];
    assert_eq!(fetch.modifiers, vec!["async", "staticmethod", "retry"]);
    assert_eq!(fetch.signature.as_deref(), Some("(url: str) -> bytes"));
}

#[test]
fn test_trailing_comment_does_not_extend_function() {
    let source = "def f():\n    return 1\n    # done\n\nX = 1\n";
    let outline = outline(source);
    assert_eq!(outline.symbols[0].end_line, 2);
    assert_eq!(outline.symbols[1].start_line, 5);
}

#[test]
fn test_syntax_error_is_reported() {
    let error = outline_source("class :\n").unwrap_err();
    assert!(error.to_string().starts_with("Syntax error: "));
}
