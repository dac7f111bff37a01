//! Core parser infrastructure: token cursor, error reporting, helpers.

use algo_lexer::token::{Token, TokenKind};
use algo_types::ast::Expr;
use algo_types::{Span, SyntaxError};

/// The expression parser.
///
/// Consumes a token stream produced by the lexer and builds an AST for
/// exactly one expression.
pub struct Parser {
    /// The token stream.
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
    /// Collected errors.
    errors: Vec<SyntaxError>,
    /// Current expression nesting depth.
    pub(crate) expr_depth: u32,
    /// Binary operators parsed so far.
    pub(crate) operators: u32,
}

/// Result of parsing.
pub struct ParseResult {
    pub expr: Option<Expr>,
    pub errors: Vec<SyntaxError>,
}

impl Parser {
    /// Create a new parser from a token stream.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let end = tokens.last().map(|t| t.span.end + 1).unwrap_or(1);
            tokens.push(Token::new(TokenKind::Eof, Span::point(end)));
        }
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            expr_depth: 0,
            operators: 0,
        }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> &Token {
        // `new` guarantees a trailing Eof, and the cursor never passes it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    /// Advance the cursor by one and return the consumed token.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// Returns the previously consumed token's span.
    pub(crate) fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::point(1)
        }
    }

    /// Returns the span of the current token.
    pub(crate) fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Returns `true` if the current token is `Eof`.
    pub(crate) fn at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    /// Check if the current token matches the given kind exactly.
    pub(crate) fn check_exact(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// If the current token matches, advance and return `true`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check_exact(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect a specific token kind. Returns the token if matched, or emits an error.
    pub(crate) fn expect(&mut self, expected: &TokenKind) -> Option<Token> {
        if self.check_exact(expected) {
            Some(self.advance())
        } else {
            self.error_at_current(format!(
                "expected '{}', got '{}'",
                expected,
                self.peek_kind()
            ));
            None
        }
    }

    // ── Error Reporting ───────────────────────────────────────────────────────

    /// Report an error at the current token position.
    pub(crate) fn error_at_current(&mut self, message: impl Into<String>) {
        let span = self.current_span();
        self.error_at(message, span);
    }

    /// Report an error at a specific span.
    pub(crate) fn error_at(&mut self, message: impl Into<String>, span: Span) {
        self.errors.push(SyntaxError::new(message, span));
    }

    /// Report an error with a fix suggestion at the current token.
    pub(crate) fn error_with_suggestion(
        &mut self,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) {
        let span = self.current_span();
        self.errors
            .push(SyntaxError::new(message, span).with_suggestion(suggestion));
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// Parse the token stream as a single expression.
    ///
    /// Trailing tokens after a complete expression are an error.
    pub fn parse(mut self) -> ParseResult {
        let expr = self.parse_expression();
        if expr.is_some() && !self.at_end() {
            self.error_with_suggestion(
                format!("unexpected '{}' after the expression", self.peek_kind()),
                "join the two parts with an operator",
            );
        }
        ParseResult {
            expr,
            errors: self.errors,
        }
    }
}
