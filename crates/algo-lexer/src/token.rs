//! Token types for the expression lexer.
//!
//! Defines [`TokenKind`] covering every lexeme of the expression grammar
//! and [`Token`], which pairs a kind with a source [`Span`].

use algo_types::Span;
use std::fmt;

/// Reserved words, matched case-insensitively.
///
/// Both the English and the French spelling of each logical operator and
/// boolean literal are recognised.
pub const WORD_OPERATORS: &[&str] = &[
    "and", "et", "or", "ou", "not", "non", "true", "vrai", "false", "faux",
];

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Every token kind in the expression grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Literals ──────────────────────────────────────────────
    /// `42`, `3.14`
    NumberLit(f64),
    /// `'text'` or `"text"`
    StringLit(String),
    /// `true` / `vrai`
    True,
    /// `false` / `faux`
    False,

    // ── Identifiers ──────────────────────────────────────────
    /// Variable name: `Somme`, `âge`, `compteur_2`
    Identifier(String),

    // ── Logical ──────────────────────────────────────────────
    /// `and`, `et`, `&&`
    And,
    /// `or`, `ou`, `||`
    Or,
    /// `not`, `non`, `!`
    Not,

    // ── Operators ────────────────────────────────────────────
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `^` or `**`
    Caret,
    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEq,
    /// `>=`
    GreaterEq,

    // ── Punctuation ──────────────────────────────────────────
    /// `(`
    LParen,
    /// `)`
    RParen,

    /// End of expression
    Eof,
}

impl TokenKind {
    /// Look up a reserved word. Returns `None` for variable names.
    pub fn from_keyword(s: &str) -> Option<TokenKind> {
        Some(match s.to_lowercase().as_str() {
            "and" | "et" => TokenKind::And,
            "or" | "ou" => TokenKind::Or,
            "not" | "non" => TokenKind::Not,
            "true" | "vrai" => TokenKind::True,
            "false" | "faux" => TokenKind::False,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::NumberLit(n) => write!(f, "{n}"),
            TokenKind::StringLit(s) => write!(f, "'{s}'"),
            TokenKind::True => write!(f, "true"),
            TokenKind::False => write!(f, "false"),
            TokenKind::Identifier(name) => write!(f, "{name}"),
            TokenKind::And => write!(f, "and"),
            TokenKind::Or => write!(f, "or"),
            TokenKind::Not => write!(f, "not"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Percent => write!(f, "%"),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::EqEq => write!(f, "=="),
            TokenKind::BangEq => write!(f, "!="),
            TokenKind::Less => write!(f, "<"),
            TokenKind::Greater => write!(f, ">"),
            TokenKind::LessEq => write!(f, "<="),
            TokenKind::GreaterEq => write!(f, ">="),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Eof => write!(f, "end of expression"),
        }
    }
}
