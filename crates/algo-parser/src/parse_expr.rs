//! Expression parsing with full operator precedence.
//!
//! Precedence (lowest → highest):
//! 8. `or` / `ou` / `||`
//! 7. `and` / `et` / `&&`
//! 6. `==`, `!=`
//! 5. `<`, `>`, `<=`, `>=`
//! 4. `+`, `-`
//! 3. `*`, `/`, `%`
//! 2. unary `-`, `+`, `not` / `non` / `!`
//! 1. `^` / `**` (right-associative)

use algo_lexer::token::TokenKind;
use algo_types::ast::*;
use algo_types::{MAX_EXPR_DEPTH, MAX_EXPR_OPERATORS};

use crate::parser::Parser;

impl Parser {
    // ══════════════════════════════════════════════════════════════════════════
    // Entry Point
    // ══════════════════════════════════════════════════════════════════════════

    /// Parse an expression.
    pub(crate) fn parse_expression(&mut self) -> Option<Expr> {
        self.expr_depth += 1;
        if self.expr_depth > MAX_EXPR_DEPTH {
            self.error_at_current(format!(
                "maximum expression nesting depth is {MAX_EXPR_DEPTH}"
            ));
            self.expr_depth -= 1;
            return None;
        }
        let result = self.parse_or();
        self.expr_depth -= 1;
        result
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Precedence Chain
    // ══════════════════════════════════════════════════════════════════════════

    /// `OrExpr = AndExpr { "or" AndExpr }`
    fn parse_or(&mut self) -> Option<Expr> {
        let mut left = self.parse_and()?;
        while self.eat(&TokenKind::Or) {
            self.count_operator()?;
            let right = self.parse_and()?;
            left = binary(left, BinOp::Or, right);
        }
        Some(left)
    }

    /// `AndExpr = EqExpr { "and" EqExpr }`
    fn parse_and(&mut self) -> Option<Expr> {
        let mut left = self.parse_equality()?;
        while self.eat(&TokenKind::And) {
            self.count_operator()?;
            let right = self.parse_equality()?;
            left = binary(left, BinOp::And, right);
        }
        Some(left)
    }

    /// `EqExpr = RelExpr { ("==" | "!=") RelExpr }`
    fn parse_equality(&mut self) -> Option<Expr> {
        let mut left = self.parse_relational()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::BangEq => BinOp::NotEq,
                _ => break,
            };
            self.advance();
            self.count_operator()?;
            let right = self.parse_relational()?;
            left = binary(left, op, right);
        }
        Some(left)
    }

    /// `RelExpr = AddExpr { ("<" | ">" | "<=" | ">=") AddExpr }`
    fn parse_relational(&mut self) -> Option<Expr> {
        let mut left = self.parse_add()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Less => BinOp::Less,
                TokenKind::Greater => BinOp::Greater,
                TokenKind::LessEq => BinOp::LessEq,
                TokenKind::GreaterEq => BinOp::GreaterEq,
                _ => break,
            };
            self.advance();
            self.count_operator()?;
            let right = self.parse_add()?;
            left = binary(left, op, right);
        }
        Some(left)
    }

    /// `AddExpr = MulExpr { ("+" | "-") MulExpr }`
    fn parse_add(&mut self) -> Option<Expr> {
        let mut left = self.parse_mul()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            self.count_operator()?;
            let right = self.parse_mul()?;
            left = binary(left, op, right);
        }
        Some(left)
    }

    /// `MulExpr = UnaryExpr { ("*" | "/" | "%") UnaryExpr }`
    fn parse_mul(&mut self) -> Option<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            self.count_operator()?;
            let right = self.parse_unary()?;
            left = binary(left, op, right);
        }
        Some(left)
    }

    /// `UnaryExpr = ( "not" | "-" | "+" ) UnaryExpr | PowExpr`
    fn parse_unary(&mut self) -> Option<Expr> {
        let start = self.current_span();
        let op = match self.peek_kind() {
            TokenKind::Not => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            _ => return self.parse_power(),
        };
        self.advance();
        let operand = self.nested(Self::parse_unary)?;
        let span = start.merge(operand.span);
        Some(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// `PowExpr = PrimaryExpr [ "^" UnaryExpr ]`
    ///
    /// The exponent may itself be negated (`2 ^ -1`); `-2 ^ 2` is `-(2 ^ 2)`.
    fn parse_power(&mut self) -> Option<Expr> {
        let base = self.parse_primary()?;
        if self.eat(&TokenKind::Caret) {
            self.count_operator()?;
            let exponent = self.nested(Self::parse_unary)?;
            return Some(binary(base, BinOp::Pow, exponent));
        }
        Some(base)
    }

    /// Run a recursive sub-parse under the nesting-depth limit.
    fn nested(&mut self, parse: fn(&mut Self) -> Option<Expr>) -> Option<Expr> {
        self.expr_depth += 1;
        if self.expr_depth > MAX_EXPR_DEPTH {
            self.error_at_current(format!(
                "maximum expression nesting depth is {MAX_EXPR_DEPTH}"
            ));
            self.expr_depth -= 1;
            return None;
        }
        let result = parse(self);
        self.expr_depth -= 1;
        result
    }

    /// Count one more binary operator against [`MAX_EXPR_OPERATORS`].
    fn count_operator(&mut self) -> Option<()> {
        self.operators += 1;
        if self.operators > MAX_EXPR_OPERATORS {
            self.error_with_suggestion(
                format!("an expression may hold at most {MAX_EXPR_OPERATORS} operators"),
                "split the computation over several assign blocks",
            );
            return None;
        }
        Some(())
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Primary Expressions
    // ══════════════════════════════════════════════════════════════════════════

    fn parse_primary(&mut self) -> Option<Expr> {
        let start = self.current_span();
        match self.peek_kind().clone() {
            TokenKind::NumberLit(n) => {
                self.advance();
                Some(Expr::new(ExprKind::NumberLit(n), start))
            }
            TokenKind::StringLit(s) => {
                self.advance();
                Some(Expr::new(ExprKind::StringLit(s), start))
            }
            TokenKind::True => {
                self.advance();
                Some(Expr::new(ExprKind::BoolLit(true), start))
            }
            TokenKind::False => {
                self.advance();
                Some(Expr::new(ExprKind::BoolLit(false), start))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if self.check_exact(&TokenKind::LParen) {
                    self.error_with_suggestion(
                        format!("'{name}' cannot be called inside an expression"),
                        "use a call block to call a function",
                    );
                    return None;
                }
                Some(Expr::new(ExprKind::Identifier(name), start))
            }
            TokenKind::LParen => {
                self.advance(); // eat `(`
                let inner = self.parse_expression()?;
                self.expect(&TokenKind::RParen)?;
                let span = start.merge(self.previous_span());
                Some(Expr::new(ExprKind::Paren(Box::new(inner)), span))
            }
            TokenKind::Eof => {
                self.error_at_current("expected expression, got end of expression");
                None
            }
            other => {
                self.error_at_current(format!("expected expression, got '{other}'"));
                None
            }
        }
    }
}

fn binary(left: Expr, op: BinOp, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        },
        span,
    )
}
