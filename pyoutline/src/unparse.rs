//! Canonical source rendering for [`Expr`]
//!
//! Produces the same text Python's own unparser would: minimal parentheses
//! driven by operator precedence, tuples bare inside subscripts, strings in
//! `repr` form.

use crate::syntax::{Argument, BinaryOperator, Constant, Expr, UnaryOperator};
use std::fmt::{self, Write};

/// Precedence levels, lowest binding first
mod precedence {
    pub const TUPLE: u8 = 2;
    pub const TEST: u8 = 4;
    pub const NOT: u8 = 7;
    pub const EXPR: u8 = 9;
    pub const BOR: u8 = EXPR;
    pub const BXOR: u8 = 10;
    pub const BAND: u8 = 11;
    pub const SHIFT: u8 = 12;
    pub const ARITH: u8 = 13;
    pub const TERM: u8 = 14;
    pub const FACTOR: u8 = 15;
    pub const POWER: u8 = 16;
    pub const ATOM: u8 = 18;
}

fn binop_precedence(op: BinaryOperator) -> u8 {
    match op {
        BinaryOperator::BitOr => precedence::BOR,
        BinaryOperator::BitXor => precedence::BXOR,
        BinaryOperator::BitAnd => precedence::BAND,
        BinaryOperator::LShift | BinaryOperator::RShift => precedence::SHIFT,
        BinaryOperator::Add | BinaryOperator::Sub => precedence::ARITH,
        BinaryOperator::Mult
        | BinaryOperator::MatMult
        | BinaryOperator::Div
        | BinaryOperator::FloorDiv
        | BinaryOperator::Mod => precedence::TERM,
        BinaryOperator::Pow => precedence::POWER,
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self, precedence::TEST)
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Positional(value) => write_expr(f, value, precedence::TEST),
            Argument::Unpacked(value) => {
                f.write_char('*')?;
                write_expr(f, value, precedence::EXPR)
            }
            Argument::Keyword { name, value } => {
                write!(f, "{name}=")?;
                write_expr(f, value, precedence::TEST)
            }
            Argument::KeywordUnpacked(value) => {
                f.write_str("**")?;
                write_expr(f, value, precedence::EXPR)
            }
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Str(value) => f.write_str(&python_repr(value)),
            Constant::Int(text) | Constant::Float(text) => f.write_str(text),
            Constant::None => f.write_str("None"),
            Constant::True => f.write_str("True"),
            Constant::False => f.write_str("False"),
            Constant::Ellipsis => f.write_str("..."),
        }
    }
}

fn write_expr(f: &mut fmt::Formatter<'_>, expr: &Expr, context: u8) -> fmt::Result {
    match expr {
        Expr::Name(id) => f.write_str(id),
        Expr::Attribute { value, attr } => {
            write_expr(f, value, precedence::ATOM)?;
            // `1.real` would lex as a float
            if matches!(value.as_ref(), Expr::Constant(Constant::Int(_))) {
                f.write_char(' ')?;
            }
            write!(f, ".{attr}")
        }
        Expr::Call { func, args } => {
            write_expr(f, func, precedence::ATOM)?;
            f.write_char('(')?;
            write_joined(f, args.iter())?;
            f.write_char(')')
        }
        Expr::Subscript { value, slice } => {
            write_expr(f, value, precedence::ATOM)?;
            f.write_char('[')?;
            match slice.as_ref() {
                Expr::Tuple(elements) if !elements.is_empty() => write_items(f, elements)?,
                other => write_expr(f, other, precedence::TEST)?,
            }
            f.write_char(']')
        }
        Expr::Tuple(elements) => {
            let parenthesize = elements.is_empty() || context > precedence::TUPLE;
            if parenthesize {
                f.write_char('(')?;
            }
            write_items(f, elements)?;
            if parenthesize {
                f.write_char(')')?;
            }
            Ok(())
        }
        Expr::List(elements) => {
            f.write_char('[')?;
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_expr(f, element, precedence::TEST)?;
            }
            f.write_char(']')
        }
        Expr::BinOp { left, op, right } => {
            let level = binop_precedence(*op);
            let (left_level, right_level) = if *op == BinaryOperator::Pow {
                (level + 1, level)
            } else {
                (level, level + 1)
            };
            parenthesized(f, context > level, |f| {
                write_expr(f, left, left_level)?;
                write!(f, " {} ", op.as_str())?;
                write_expr(f, right, right_level)
            })
        }
        Expr::UnaryOp { op, operand } => {
            let level = match op {
                UnaryOperator::Not => precedence::NOT,
                _ => precedence::FACTOR,
            };
            parenthesized(f, context > level, |f| {
                f.write_str(op.as_str())?;
                write_expr(f, operand, level)
            })
        }
        Expr::Starred(value) => {
            f.write_char('*')?;
            write_expr(f, value, precedence::EXPR)
        }
        Expr::Constant(constant) => write!(f, "{constant}"),
        Expr::Raw(text) => f.write_str(text),
    }
}

/// Tuple elements without delimiters; a single element keeps its comma
fn write_items(f: &mut fmt::Formatter<'_>, elements: &[Expr]) -> fmt::Result {
    if let [only] = elements {
        write_expr(f, only, precedence::TEST)?;
        return f.write_char(',');
    }
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_expr(f, element, precedence::TEST)?;
    }
    Ok(())
}

fn write_joined<'a, T>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a T>,
) -> fmt::Result
where
    T: fmt::Display + 'a,
{
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn parenthesized<F>(f: &mut fmt::Formatter<'_>, wrap: bool, body: F) -> fmt::Result
where
    F: FnOnce(&mut fmt::Formatter<'_>) -> fmt::Result,
{
    if wrap {
        f.write_char('(')?;
    }
    body(f)?;
    if wrap {
        f.write_char(')')?;
    }
    Ok(())
}

/// Render a string value the way Python's `repr` does
pub fn python_repr(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            '\'' | '"' => out.push(ch),
            c if !is_printable(c) => {
                let code = c as u32;
                let _ = match code {
                    0..=0xff => write!(out, "\\x{code:02x}"),
                    0x100..=0xffff => write!(out, "\\u{code:04x}"),
                    _ => write!(out, "\\U{code:08x}"),
                };
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Python's `str.isprintable` for a single character
fn is_printable(c: char) -> bool {
    // Past the first character, `escape_debug` escapes exactly the characters
    // Python considers non-printable
    let pair: String = ['a', c].into_iter().collect();
    pair.escape_debug().skip(1).eq([c])
}
