use crate::Span;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A lexing or parsing diagnostic for one expression.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{span}: {message}")]
pub struct SyntaxError {
    /// Human-readable error message.
    pub message: String,
    /// Location inside the expression text.
    pub span: Span,
    /// Optional fix suggestion shown next to the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl SyntaxError {
    /// Create a new error.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            suggestion: None,
        }
    }

    /// Attach a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = SyntaxError::new("unexpected character '='", Span::point(3));
        assert_eq!(err.to_string(), "col 3: unexpected character '='");
    }

    #[test]
    fn test_syntax_error_with_suggestion() {
        let err = SyntaxError::new("unexpected character '='", Span::point(3))
            .with_suggestion("use '==' to compare values");
        assert_eq!(err.suggestion.as_deref(), Some("use '==' to compare values"));
    }

    #[test]
    fn test_syntax_error_json_skips_missing_suggestion() {
        let err = SyntaxError::new("expected expression", Span::new(1, 1));
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"message\""));
        assert!(!json.contains("\"suggestion\""));
    }
}
