//! Lexer tests: operators, literals, word operators and error recovery.

use algo_lexer::{LexResult, Lexer, TokenKind};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn lex(source: &str) -> LexResult {
    Lexer::new(source).lex()
}

/// Token kinds without the trailing Eof, panicking on lex errors.
fn kinds_ok(source: &str) -> Vec<TokenKind> {
    let result = lex(source);
    if !result.errors.is_empty() {
        for e in &result.errors {
            eprintln!("  ERROR: {e}");
        }
        panic!("unexpected lex errors (see above)");
    }
    let mut kinds: Vec<TokenKind> = result.tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(kinds.pop(), Some(TokenKind::Eof));
    kinds
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Identifier(name.to_string())
}

// ─────────────────────────────────────────────────────────────────────
// Literals
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_integer_and_decimal_numbers() {
    assert_eq!(
        kinds_ok("10 2.5 .5"),
        vec![
            TokenKind::NumberLit(10.0),
            TokenKind::NumberLit(2.5),
            TokenKind::NumberLit(0.5),
        ]
    );
}

#[test]
fn test_number_exponent() {
    assert_eq!(kinds_ok("1e3"), vec![TokenKind::NumberLit(1000.0)]);
    assert_eq!(kinds_ok("2.5E-1"), vec![TokenKind::NumberLit(0.25)]);
}

#[test]
fn test_trailing_dot_is_not_part_of_number() {
    let result = lex("3.");
    assert_eq!(result.tokens[0].kind, TokenKind::NumberLit(3.0));
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn test_double_and_single_quoted_strings() {
    assert_eq!(
        kinds_ok(r#""Bonjour le monde !" 'Alice'"#),
        vec![
            TokenKind::StringLit("Bonjour le monde !".into()),
            TokenKind::StringLit("Alice".into()),
        ]
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        kinds_ok(r#""a\"b\n""#),
        vec![TokenKind::StringLit("a\"b\n".into())]
    );
}

#[test]
fn test_unterminated_string_reports_error() {
    let result = lex("\"Somme = ");
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].message.contains("unterminated"));
    assert_eq!(result.tokens[0].kind, TokenKind::StringLit("Somme = ".into()));
}

// ─────────────────────────────────────────────────────────────────────
// Identifiers and word operators
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_unicode_identifiers() {
    assert_eq!(kinds_ok("âge côté_2"), vec![ident("âge"), ident("côté_2")]);
}

#[test]
fn test_french_and_english_word_operators() {
    assert_eq!(
        kinds_ok("a ET b OU NON c"),
        vec![
            ident("a"),
            TokenKind::And,
            ident("b"),
            TokenKind::Or,
            TokenKind::Not,
            ident("c"),
        ]
    );
    assert_eq!(
        kinds_ok("x and y or not z"),
        kinds_ok("x et y ou non z")
    );
}

#[test]
fn test_symbolic_logical_aliases() {
    assert_eq!(
        kinds_ok("a && b || !c"),
        vec![
            ident("a"),
            TokenKind::And,
            ident("b"),
            TokenKind::Or,
            TokenKind::Not,
            ident("c"),
        ]
    );
}

#[test]
fn test_boolean_literals() {
    assert_eq!(
        kinds_ok("vrai FAUX true False"),
        vec![
            TokenKind::True,
            TokenKind::False,
            TokenKind::True,
            TokenKind::False,
        ]
    );
}

#[test]
fn test_keyword_prefix_stays_identifier() {
    assert_eq!(kinds_ok("etat ouvert"), vec![ident("etat"), ident("ouvert")]);
}

// ─────────────────────────────────────────────────────────────────────
// Operators
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_comparison_operators() {
    assert_eq!(
        kinds_ok("== != < > <= >="),
        vec![
            TokenKind::EqEq,
            TokenKind::BangEq,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEq,
            TokenKind::GreaterEq,
        ]
    );
}

#[test]
fn test_arithmetic_operators() {
    assert_eq!(
        kinds_ok("+ - * / % ^ ** ( )"),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Caret,
            TokenKind::Caret,
            TokenKind::LParen,
            TokenKind::RParen,
        ]
    );
}

#[test]
fn test_no_whitespace_needed() {
    assert_eq!(
        kinds_ok("i<=10"),
        vec![ident("i"), TokenKind::LessEq, TokenKind::NumberLit(10.0)]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_single_equals_suggests_double() {
    let result = lex("maVariable = 10");
    assert_eq!(result.errors.len(), 1);
    let err = &result.errors[0];
    assert_eq!(err.span.start, 12);
    assert!(err.suggestion.as_deref().unwrap_or("").contains("=="));
}

#[test]
fn test_single_ampersand_and_pipe() {
    let result = lex("a & b | c");
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_lexer_recovers_after_bad_character() {
    let result = lex("a # b");
    assert_eq!(result.errors.len(), 1);
    let kinds: Vec<_> = result.tokens.iter().map(|t| t.kind.clone()).collect();
    assert_eq!(kinds, vec![ident("a"), ident("b"), TokenKind::Eof]);
}

#[test]
fn test_long_run_of_bad_characters() {
    let result = lex(&"@".repeat(100_000));
    assert_eq!(result.errors.len(), 100_000);
    assert_eq!(result.tokens.len(), 1);
    assert_eq!(result.tokens[0].kind, TokenKind::Eof);
}

#[test]
fn test_lexer_determinism_100_iterations() {
    let source = "(Somme + i * 2) >= 15 ET NON fini";
    let first: Vec<_> = lex(source).tokens;
    for _ in 0..100 {
        assert_eq!(lex(source).tokens, first);
    }
}
