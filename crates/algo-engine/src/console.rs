//! Console lines produced by a run.

use std::fmt;

use algo_types::Value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleLevel {
    Info,
    Error,
    Success,
}

/// One line of console output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleLine {
    pub level: ConsoleLevel,
    pub text: String,
}

impl ConsoleLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: ConsoleLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: ConsoleLevel::Error,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: ConsoleLevel::Success,
            text: text.into(),
        }
    }

    /// The line a `display` or `write` block prints: `> value`.
    pub fn output(value: &Value) -> Self {
        Self::info(format!("> {value}"))
    }

    pub fn is_error(&self) -> bool {
        self.level == ConsoleLevel::Error
    }
}

impl fmt::Display for ConsoleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_line_format() {
        assert_eq!(ConsoleLine::output(&Value::from(15)).text, "> 15");
        assert_eq!(
            ConsoleLine::output(&Value::from("Majeur")).text,
            "> Majeur"
        );
    }

    #[test]
    fn test_console_line_json() {
        let json = serde_json::to_value(ConsoleLine::error("boom")).unwrap();
        assert_eq!(json, serde_json::json!({ "level": "error", "text": "boom" }));
    }
}
