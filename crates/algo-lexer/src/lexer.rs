//! Expression lexer: converts one line of block property text into tokens.
//!
//! Features:
//! - Numbers, single- and double-quoted strings with `\` escapes
//! - Unicode identifiers (`âge`, `côté`)
//! - Word operators in English and French (`ET`, `or`, `NON`)
//! - Symbolic aliases `&&`, `||`, `!` and `**`
//! - Error recovery: keeps scanning after a bad character

use algo_types::{Span, SyntaxError};

use crate::token::{Token, TokenKind};

/// The expression lexer.
pub struct Lexer {
    /// Source characters; columns index into this.
    chars: Vec<char>,
    /// Current index into `chars`.
    pos: usize,
    /// Collected errors.
    errors: Vec<SyntaxError>,
}

/// Result of lexing: tokens + any errors collected.
pub struct LexResult {
    /// The token stream (always ends with [`TokenKind::Eof`]).
    pub tokens: Vec<Token>,
    /// Errors encountered during lexing.
    pub errors: Vec<SyntaxError>,
}

impl Lexer {
    /// Create a new lexer for the given expression text.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Lex the entire expression into a token stream.
    pub fn lex(mut self) -> LexResult {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        LexResult {
            tokens,
            errors: self.errors,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    /// 1-based column of the next character.
    fn col(&self) -> u32 {
        self.pos as u32 + 1
    }

    /// Span from `start` (1-based) to the last consumed character.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, (self.pos as u32).max(start))
    }

    fn emit_error(&mut self, message: impl Into<String>, span: Span) {
        self.errors.push(SyntaxError::new(message, span));
    }

    fn emit_error_with_suggestion(
        &mut self,
        message: impl Into<String>,
        span: Span,
        suggestion: impl Into<String>,
    ) {
        self.errors
            .push(SyntaxError::new(message, span).with_suggestion(suggestion));
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    /// Scan the next token, skipping past characters that start none.
    fn scan_token(&mut self) -> Token {
        loop {
            if let Some(token) = self.scan_one() {
                return token;
            }
        }
    }

    /// Scan one token, or report the bad character and return `None`.
    fn scan_one(&mut self) -> Option<Token> {
        self.skip_whitespace();
        let start = self.col();
        let Some(ch) = self.advance() else {
            return Some(Token::new(TokenKind::Eof, Span::point(start)));
        };

        let kind = match ch {
            '0'..='9' => return Some(self.scan_number(start)),
            '.' if matches!(self.peek(), Some('0'..='9')) => return Some(self.scan_number(start)),
            '"' | '\'' => return Some(self.scan_string(ch, start)),
            c if c.is_alphabetic() || c == '_' => return Some(self.scan_identifier(start)),

            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,

            '*' => {
                if self.peek() == Some('*') {
                    self.advance();
                    TokenKind::Caret
                } else {
                    TokenKind::Star
                }
            }

            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::EqEq
                } else {
                    let span = self.span_from(start);
                    self.emit_error_with_suggestion(
                        "unexpected character '='",
                        span,
                        "use '==' to compare values; assignment is done with an assign block",
                    );
                    return None;
                }
            }

            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::BangEq
                } else {
                    TokenKind::Not
                }
            }

            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::LessEq
                } else {
                    TokenKind::Less
                }
            }

            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::GreaterEq
                } else {
                    TokenKind::Greater
                }
            }

            '&' | '|' => {
                if self.peek() == Some(ch) {
                    self.advance();
                    if ch == '&' {
                        TokenKind::And
                    } else {
                        TokenKind::Or
                    }
                } else {
                    let span = self.span_from(start);
                    let word = if ch == '&' { "ET" } else { "OU" };
                    self.emit_error_with_suggestion(
                        format!("unexpected character '{ch}'"),
                        span,
                        format!("use '{word}' or '{ch}{ch}'"),
                    );
                    return None;
                }
            }

            _ => {
                let span = self.span_from(start);
                self.emit_error(format!("unexpected character '{ch}'"), span);
                return None;
            }
        };

        Some(Token::new(kind, self.span_from(start)))
    }

    fn scan_number(&mut self, start: u32) -> Token {
        // First digit (or leading '.') already consumed
        let mut seen_dot = self.chars[self.pos - 1] == '.';
        while let Some(ch) = self.peek() {
            match ch {
                '0'..='9' => {
                    self.advance();
                }
                '.' if !seen_dot && matches!(self.peek_at(1), Some('0'..='9')) => {
                    seen_dot = true;
                    self.advance();
                }
                _ => break,
            }
        }
        // Optional exponent: `1e3`, `2.5E-2`
        if matches!(self.peek(), Some('e' | 'E')) {
            let digits_at = match self.peek_at(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if matches!(self.peek_at(digits_at), Some('0'..='9')) {
                for _ in 0..digits_at {
                    self.advance();
                }
                while matches!(self.peek(), Some('0'..='9')) {
                    self.advance();
                }
            }
        }

        let text: String = self.chars[(start as usize - 1)..self.pos].iter().collect();
        let value: f64 = text.parse().unwrap_or(0.0);
        Token::new(TokenKind::NumberLit(value), self.span_from(start))
    }

    fn scan_identifier(&mut self, start: u32) -> Token {
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        let text: String = self.chars[(start as usize - 1)..self.pos].iter().collect();
        let kind = TokenKind::from_keyword(&text).unwrap_or(TokenKind::Identifier(text));
        Token::new(kind, self.span_from(start))
    }

    /// Scan a string literal after its opening quote.
    fn scan_string(&mut self, quote: char, start: u32) -> Token {
        let mut buf = String::new();
        loop {
            match self.advance() {
                None => {
                    let span = self.span_from(start);
                    self.emit_error_with_suggestion(
                        "unterminated string literal",
                        span,
                        format!("close the text with {quote}"),
                    );
                    break;
                }
                Some(c) if c == quote => break,
                Some('\\') => match self.advance() {
                    Some('n') => buf.push('\n'),
                    Some('t') => buf.push('\t'),
                    // `\'`, `\"`, `\\` and any other escaped character
                    Some(other) => buf.push(other),
                    None => buf.push('\\'),
                },
                Some(c) => buf.push(c),
            }
        }
        Token::new(TokenKind::StringLit(buf), self.span_from(start))
    }
}
