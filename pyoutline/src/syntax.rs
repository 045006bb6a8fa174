//! Typed Python syntax tree consumed by the outline walkers
//!
//! The tree covers exactly the node kinds the outline cares about. Statements
//! and expressions outside that set collapse into [`StmtKind::Compound`],
//! [`StmtKind::Other`] or [`Expr::Raw`], so every consumer matches over a
//! closed set of variants.

/// Root of a parsed source file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Module {
    /// Top-level statements in source order
    pub body: Vec<Stmt>,
}

impl Module {
    /// Create a module from its statements
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}

/// A located statement
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    /// What kind of statement this is
    pub kind: StmtKind,
    /// 1-based first line
    pub start_line: usize,
    /// 1-based last line, when the producer of the tree knows it
    pub end_line: Option<usize>,
}

impl Stmt {
    /// Create a statement with an exact span
    pub fn new(kind: StmtKind, start_line: usize, end_line: usize) -> Self {
        Self {
            kind,
            start_line,
            end_line: Some(end_line),
        }
    }

    /// Create a statement whose end line is unknown
    pub fn without_end(kind: StmtKind, start_line: usize) -> Self {
        Self {
            kind,
            start_line,
            end_line: None,
        }
    }
}

/// The closed set of statement kinds
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `def` or `async def`
    FunctionDef(FunctionDef),
    /// `class`
    ClassDef(ClassDef),
    /// `a = b = value`
    Assign {
        /// Every target, left to right
        targets: Vec<Expr>,
    },
    /// `name: Type` or `name: Type = value`
    AnnAssign {
        /// The annotated target
        target: Expr,
        /// The annotation expression
        annotation: Expr,
    },
    /// `import a.b, c as d`
    Import {
        /// Dotted module names, aliases dropped
        names: Vec<String>,
    },
    /// `from ..pkg import name`
    ImportFrom {
        /// Module path after the leading dots, if any
        module: Option<String>,
        /// Number of leading dots
        level: usize,
    },
    /// if/for/while/try/with/match, reduced to their nested statements
    Compound {
        /// Statements from every clause, in source order
        body: Vec<Stmt>,
    },
    /// Anything else
    Other,
}

/// A function definition
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub is_async: bool,
    /// Decorator expressions in source order
    pub decorators: Vec<Expr>,
    pub parameters: Parameters,
    /// Return annotation
    pub returns: Option<Expr>,
    pub body: Vec<Stmt>,
}

/// A class definition
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    /// Decorator expressions in source order
    pub decorators: Vec<Expr>,
    pub body: Vec<Stmt>,
}

/// A function's parameter list, grouped the way Python groups them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    /// Parameters before `/`
    pub posonly: Vec<Param>,
    /// Regular positional-or-keyword parameters
    pub args: Vec<Param>,
    /// `*args`
    pub vararg: Option<Param>,
    /// Parameters after `*` or `*args`
    pub kwonly: Vec<Param>,
    /// `**kwargs`
    pub kwarg: Option<Param>,
}

/// A single parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub annotation: Option<Expr>,
}

impl Param {
    /// Create an unannotated parameter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: None,
        }
    }

    /// Attach a type annotation
    pub fn with_annotation(mut self, annotation: Expr) -> Self {
        self.annotation = Some(annotation);
        self
    }
}

/// Expressions that can appear in annotations, decorators and targets
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `name`
    Name(String),
    /// `value.attr`
    Attribute { value: Box<Expr>, attr: String },
    /// `func(args)`
    Call { func: Box<Expr>, args: Vec<Argument> },
    /// `value[slice]`; a multi-element slice is an [`Expr::Tuple`]
    Subscript { value: Box<Expr>, slice: Box<Expr> },
    /// `(a, b)`
    Tuple(Vec<Expr>),
    /// `[a, b]`
    List(Vec<Expr>),
    /// `left op right`
    BinOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    /// `op operand`
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    /// `*value`
    Starred(Box<Expr>),
    /// Literal constant
    Constant(Constant),
    /// Source text of a construct the outline never looks inside
    Raw(String),
}

impl Expr {
    /// Shorthand for [`Expr::Name`]
    pub fn name(id: impl Into<String>) -> Self {
        Expr::Name(id.into())
    }

    /// Shorthand for [`Expr::Attribute`]
    pub fn attribute(value: Expr, attr: impl Into<String>) -> Self {
        Expr::Attribute {
            value: Box::new(value),
            attr: attr.into(),
        }
    }

    /// Shorthand for [`Expr::Call`]
    pub fn call(func: Expr, args: Vec<Argument>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
        }
    }

    /// Shorthand for [`Expr::Subscript`]
    pub fn subscript(value: Expr, slice: Expr) -> Self {
        Expr::Subscript {
            value: Box::new(value),
            slice: Box::new(slice),
        }
    }

    /// Shorthand for [`Expr::BinOp`]
    pub fn binop(left: Expr, op: BinaryOperator, right: Expr) -> Self {
        Expr::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// The identifier if this is a bare name
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Expr::Name(id) => Some(id),
            _ => None,
        }
    }
}

/// One argument of a call
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// `value`
    Positional(Expr),
    /// `*value`
    Unpacked(Expr),
    /// `name=value`
    Keyword { name: String, value: Expr },
    /// `**value`
    KeywordUnpacked(Expr),
}

/// Literal constants
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// Decoded string value
    Str(String),
    /// Integer literal, already normalized to decimal when it fits
    Int(String),
    /// Float or imaginary literal as written, underscores removed
    Float(String),
    None,
    True,
    False,
    Ellipsis,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    BitOr,
    BitXor,
    BitAnd,
    LShift,
    RShift,
    Add,
    Sub,
    Mult,
    MatMult,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl BinaryOperator {
    /// Parse an operator token
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "|" => Self::BitOr,
            "^" => Self::BitXor,
            "&" => Self::BitAnd,
            "<<" => Self::LShift,
            ">>" => Self::RShift,
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mult,
            "@" => Self::MatMult,
            "/" => Self::Div,
            "//" => Self::FloorDiv,
            "%" => Self::Mod,
            "**" => Self::Pow,
            _ => return None,
        };
        Some(op)
    }

    /// Source token for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::LShift => "<<",
            Self::RShift => ">>",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mult => "*",
            Self::MatMult => "@",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            Self::Pow => "**",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Invert,
    Not,
    UAdd,
    USub,
}

impl UnaryOperator {
    /// Parse an operator token
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "~" => Self::Invert,
            "not" => Self::Not,
            "+" => Self::UAdd,
            "-" => Self::USub,
            _ => return None,
        };
        Some(op)
    }

    /// Source token for this operator, including any separating space
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invert => "~",
            Self::Not => "not ",
            Self::UAdd => "+",
            Self::USub => "-",
        }
    }
}
