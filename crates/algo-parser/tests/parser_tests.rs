//! Parser tests: precedence, associativity, grouping, error reporting
//! and determinism.

use algo_lexer::Lexer;
use algo_parser::{parse_expression, ParseResult, Parser};
use algo_types::ast::*;
use algo_types::{MAX_EXPR_DEPTH, MAX_EXPR_OPERATORS};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn parse(source: &str) -> ParseResult {
    let lex = Lexer::new(source).lex();
    assert!(lex.errors.is_empty(), "lex errors in {source:?}");
    Parser::new(lex.tokens).parse()
}

fn parse_ok(source: &str) -> Expr {
    match parse_expression(source) {
        Ok(expr) => expr,
        Err(e) => panic!("unexpected parse error in {source:?}: {e}"),
    }
}

fn parse_err(source: &str) -> String {
    match parse_expression(source) {
        Ok(expr) => panic!("expected an error for {source:?}, got {expr:?}"),
        Err(e) => e.message,
    }
}

/// Render the tree fully parenthesized so precedence is visible.
fn show(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::NumberLit(n) => format!("{n}"),
        ExprKind::StringLit(s) => format!("{s:?}"),
        ExprKind::BoolLit(b) => format!("{b}"),
        ExprKind::Identifier(name) => name.clone(),
        ExprKind::Binary { left, op, right } => {
            format!("({} {} {})", show(left), op.as_str(), show(right))
        }
        ExprKind::Unary { op, operand } => format!("({} {})", op.as_str(), show(operand)),
        ExprKind::Paren(inner) => show(inner),
    }
}

fn shape(source: &str) -> String {
    show(&parse_ok(source))
}

// ─────────────────────────────────────────────────────────────────────
// Primaries
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_number_literal() {
    assert_eq!(parse_ok("42").kind, ExprKind::NumberLit(42.0));
}

#[test]
fn test_string_literal() {
    assert_eq!(
        parse_ok("\"Bonjour\"").kind,
        ExprKind::StringLit("Bonjour".into())
    );
}

#[test]
fn test_bool_literals_in_both_languages() {
    assert_eq!(parse_ok("VRAI").kind, ExprKind::BoolLit(true));
    assert_eq!(parse_ok("false").kind, ExprKind::BoolLit(false));
}

#[test]
fn test_identifier() {
    assert_eq!(
        parse_ok("maVariable").kind,
        ExprKind::Identifier("maVariable".into())
    );
}

#[test]
fn test_parenthesized_expression_keeps_paren_node() {
    let expr = parse_ok("(1)");
    assert!(matches!(expr.kind, ExprKind::Paren(_)));
    assert_eq!(expr.span.start, 1);
    assert_eq!(expr.span.end, 3);
}

// ─────────────────────────────────────────────────────────────────────
// Precedence and associativity
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_mul_binds_tighter_than_add() {
    assert_eq!(shape("1 + 2 * 3"), "(1 + (2 * 3))");
    assert_eq!(shape("(1 + 2) * 3"), "((1 + 2) * 3)");
}

#[test]
fn test_arithmetic_is_left_associative() {
    assert_eq!(shape("10 - 3 - 2"), "((10 - 3) - 2)");
    assert_eq!(shape("100 / 10 / 2"), "((100 / 10) / 2)");
    assert_eq!(shape("7 % 4 * 2"), "((7 % 4) * 2)");
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(shape("2 ^ 3 ^ 2"), "(2 ^ (3 ^ 2))");
    assert_eq!(shape("2 ** 3"), "(2 ^ 3)");
}

#[test]
fn test_unary_minus_and_power() {
    assert_eq!(shape("-2 ^ 2"), "(- (2 ^ 2))");
    assert_eq!(shape("2 ^ -1"), "(2 ^ (- 1))");
}

#[test]
fn test_comparison_below_arithmetic() {
    assert_eq!(shape("Somme + 1 >= 15"), "((Somme + 1) >= 15)");
}

#[test]
fn test_equality_below_relational() {
    assert_eq!(shape("a < b == vrai"), "((a < b) == true)");
}

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(shape("a OU b ET c"), "(a or (b and c))");
    assert_eq!(shape("a || b && c"), "(a or (b and c))");
}

#[test]
fn test_not_applies_to_primary() {
    assert_eq!(shape("NON a ET b"), "((not a) and b)");
    assert_eq!(shape("non (a et b)"), "(not (a and b))");
    assert_eq!(shape("!!a"), "(not (not a))");
}

#[test]
fn test_age_condition() {
    assert_eq!(
        shape("age >= 18 et age < 65"),
        "((age >= 18) and (age < 65))"
    );
}

#[test]
fn test_chained_comparisons_parse_left_to_right() {
    assert_eq!(shape("1 < 2 < 3"), "((1 < 2) < 3)");
}

// ─────────────────────────────────────────────────────────────────────
// Spans
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_binary_span_covers_both_operands() {
    let expr = parse_ok("i <= 10");
    assert_eq!(expr.span.start, 1);
    assert_eq!(expr.span.end, 7);
}

// ─────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_expression() {
    assert!(parse_err("").contains("expected expression"));
    assert!(parse_err("   ").contains("end of expression"));
}

#[test]
fn test_missing_right_operand() {
    assert!(parse_err("1 +").contains("expected expression"));
}

#[test]
fn test_missing_close_paren() {
    assert!(parse_err("(1 + 2").contains("expected ')'"));
}

#[test]
fn test_trailing_tokens_rejected() {
    let result = parse("a b");
    assert!(result.expr.is_some());
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].message.contains("unexpected 'b'"));
}

#[test]
fn test_call_syntax_rejected() {
    let msg = parse_err("carre(3)");
    assert!(msg.contains("cannot be called"));
}

#[test]
fn test_lex_error_surfaces_first() {
    let err = parse_expression("x = 10").unwrap_err();
    assert_eq!(err.span.start, 3);
    assert!(err.message.contains("'='"));
}

#[test]
fn test_nesting_depth_limit() {
    let ok = format!(
        "{}1{}",
        "(".repeat(MAX_EXPR_DEPTH as usize - 1),
        ")".repeat(MAX_EXPR_DEPTH as usize - 1)
    );
    parse_ok(&ok);

    let too_deep = format!("{}1{}", "(".repeat(40), ")".repeat(40));
    assert!(parse_err(&too_deep).contains("maximum expression nesting depth"));
}

#[test]
fn test_unary_chain_depth_limit() {
    let too_deep = format!("{}1", "-".repeat(64));
    assert!(parse_err(&too_deep).contains("maximum expression nesting depth"));
}

#[test]
fn test_operator_count_limit() {
    let at_limit = format!("1{}", " + 1".repeat(MAX_EXPR_OPERATORS as usize));
    parse_ok(&at_limit);

    let too_long = format!("1{}", " + 1".repeat(MAX_EXPR_OPERATORS as usize + 1));
    assert!(parse_err(&too_long).contains("at most"));
}

#[test]
fn test_operator_count_spans_all_levels() {
    // Operators inside parentheses and of every precedence count together.
    let half = MAX_EXPR_OPERATORS as usize / 2;
    let mixed = format!("(1{}) ou 2{}", " * 2".repeat(half), " - 1".repeat(half));
    assert!(parse_err(&mixed).contains("at most"));
}

#[test]
fn test_very_long_chain_is_an_error() {
    let source = format!("1{}", " + 1".repeat(8_000));
    let err = parse_expression(&source).unwrap_err();
    assert!(err.suggestion.as_deref().unwrap_or("").contains("assign"));
}

// ─────────────────────────────────────────────────────────────────────
// Determinism
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_parser_determinism_100_iterations() {
    let source = "(Somme + i) * 2 >= 15 ou non fini";
    let first = parse_ok(source);
    for _ in 0..100 {
        assert_eq!(parse_ok(source), first);
    }
}
