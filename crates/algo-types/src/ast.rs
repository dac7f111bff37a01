//! Expression AST.
//!
//! Every node carries a [`Span`] for error reporting.

use crate::Span;

/// An expression node with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Names of all variables this expression reads, in source order,
    /// without duplicates.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_identifiers(&mut names);
        names
    }

    fn collect_identifiers<'a>(&'a self, names: &mut Vec<&'a str>) {
        match &self.kind {
            ExprKind::Identifier(name) => {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
            ExprKind::Binary { left, right, .. } => {
                left.collect_identifiers(names);
                right.collect_identifiers(names);
            }
            ExprKind::Unary { operand, .. } => operand.collect_identifiers(names),
            ExprKind::Paren(inner) => inner.collect_identifiers(names),
            ExprKind::NumberLit(_) | ExprKind::StringLit(_) | ExprKind::BoolLit(_) => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `42`, `3.14`
    NumberLit(f64),
    /// `'hello'` or `"hello"`
    StringLit(String),
    /// `true` / `false` / `vrai` / `faux`
    BoolLit(bool),
    /// `Somme`, `age`
    Identifier(String),
    /// `a + b`, `a >= 18`, `a ET b`
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    /// `-x`, `NON x`
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// `(expr)`
    Paren(Box<Expr>),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Logical
    Or,
    And,
    // Equality
    Eq,
    NotEq,
    // Relational
    Less,
    Greater,
    LessEq,
    GreaterEq,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinOp {
    /// Returns the operator symbol for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Or => "or",
            BinOp::And => "and",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Less => "<",
            BinOp::Greater => ">",
            BinOp::LessEq => "<=",
            BinOp::GreaterEq => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "^",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `+x` (numeric conversion)
    Plus,
    /// `not x`
    Not,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "not",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str, col: u32) -> Expr {
        Expr::new(ExprKind::Identifier(name.into()), Span::point(col))
    }

    #[test]
    fn test_identifiers_deduplicated_in_order() {
        // Somme + i * Somme
        let expr = Expr::new(
            ExprKind::Binary {
                left: Box::new(ident("Somme", 1)),
                op: BinOp::Add,
                right: Box::new(Expr::new(
                    ExprKind::Binary {
                        left: Box::new(ident("i", 9)),
                        op: BinOp::Mul,
                        right: Box::new(ident("Somme", 13)),
                    },
                    Span::new(9, 17),
                )),
            },
            Span::new(1, 17),
        );
        assert_eq!(expr.identifiers(), vec!["Somme", "i"]);
    }

    #[test]
    fn test_literals_have_no_identifiers() {
        let expr = Expr::new(ExprKind::NumberLit(1.0), Span::point(1));
        assert!(expr.identifiers().is_empty());
    }
}
