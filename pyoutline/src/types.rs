//! Core data structures for outline output

use serde::{Deserialize, Serialize};

/// Kind of program entity a [`Symbol`] describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// Class definition
    Class,
    /// Function or method definition
    Function,
    /// Upper-case module-level assignment
    Constant,
    /// Annotated lower-case module-level assignment
    Variable,
}

impl SymbolKind {
    /// Classify an assigned name: entirely upper-case names are constants
    pub fn for_assigned_name(name: &str) -> Self {
        if is_upper(name) {
            Self::Constant
        } else {
            Self::Variable
        }
    }
}

/// Python's `str.isupper`: at least one cased character and no lower-case ones
pub fn is_upper(name: &str) -> bool {
    name.chars().any(char::is_uppercase) && !name.chars().any(char::is_lowercase)
}

/// A located, named program entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    /// Identifier text
    pub name: String,
    /// Type of symbol
    pub kind: SymbolKind,
    /// Starting line number (1-based)
    pub start_line: usize,
    /// Ending line number (1-based, inclusive)
    pub end_line: usize,
    /// Rendered parameter list and return type (functions only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// `async` followed by decorator names, in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
    /// Nested definitions (classes only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Symbol>,
}

impl Symbol {
    /// Create a new symbol; an end line before the start line is clamped
    pub fn new(
        name: impl Into<String>,
        kind: SymbolKind,
        start_line: usize,
        end_line: usize,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            start_line,
            end_line: end_line.max(start_line),
            signature: None,
            modifiers: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the signature
    pub fn with_signature(mut self, signature: String) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Set the modifiers
    pub fn with_modifiers(mut self, modifiers: Vec<String>) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the nested symbols
    pub fn with_children(mut self, children: Vec<Symbol>) -> Self {
        self.children = children;
        self
    }
}

/// Complete outline of a source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Imported module paths, sorted and deduplicated
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    /// Top-level symbols in declaration order
    pub symbols: Vec<Symbol>,
}

impl Outline {
    /// Create a new outline
    pub fn new(imports: Vec<String>, symbols: Vec<Symbol>) -> Self {
        Self { imports, symbols }
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
