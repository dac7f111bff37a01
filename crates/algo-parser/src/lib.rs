//! Expression parser: converts a token stream into an AST.

mod parse_expr;
mod parser;

pub use parser::{ParseResult, Parser};

use algo_lexer::Lexer;
use algo_types::ast::Expr;
use algo_types::SyntaxError;

/// Lex and parse `source`, returning the first diagnostic on failure.
pub fn parse_expression(source: &str) -> Result<Expr, SyntaxError> {
    let lexed = Lexer::new(source).lex();
    if let Some(err) = lexed.errors.into_iter().next() {
        return Err(err);
    }
    let result = Parser::new(lexed.tokens).parse();
    match (result.expr, result.errors.into_iter().next()) {
        (Some(expr), None) => Ok(expr),
        (_, Some(err)) => Err(err),
        (None, None) => Err(SyntaxError::new(
            "expected expression",
            algo_types::Span::point(1),
        )),
    }
}
