//! Runtime values and declared variable types.
//!
//! Values follow the loose coercion rules learners already saw in the
//! browser console: numbers are doubles, `+` concatenates as soon as one
//! side is a string, and comparisons fall back to numeric conversion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A runtime value held by a variable or produced by an expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Bool(bool),
    String(String),
}

impl Value {
    /// `0`, `NaN`, `""` and `false` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Bool(b) => *b,
            Value::String(s) => !s.is_empty(),
        }
    }

    /// Numeric conversion. Unparseable strings become `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::String(s) => string_to_number(s),
        }
    }

    /// Loose equality: same kinds compare directly, mixed kinds compare
    /// numerically.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            _ => self.to_number() == other.to_number(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Bool(b) => write!(f, "{b}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// Format a number the way the console prints it: integers without a
/// fractional part, `NaN` and `Infinity` spelled out, and exponent form
/// (`1e+21`, `1e-7`) below 1e-6 or from 1e21 on.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        // also folds -0
        "0".to_string()
    } else if n.abs() < 1e-6 || n.abs() >= 1e21 {
        let text = format!("{n:e}");
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        }
    } else {
        format!("{n}")
    }
}

fn string_to_number(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // `f64::from_str` also accepts "inf" and "nan", which are not numbers here.
    if !t
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return f64::NAN;
    }
    t.parse().unwrap_or(f64::NAN)
}

/// Parse the leading integer of `s`, ignoring trailing garbage
/// (`"12abc"` is 12, `"3.7"` is 3). `None` when no digit leads.
fn parse_int_prefix(s: &str) -> Option<f64> {
    let t = s.trim_start();
    let (negative, rest) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let n: f64 = digits.parse().ok()?;
    Some(if negative { -n } else { n })
}

/// Parse the leading decimal number of `s` (`"2.5kg"` is 2.5).
fn parse_float_prefix(s: &str) -> Option<f64> {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if t[end..].starts_with("Infinity") {
        return Some(if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    let mut mantissa_digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        mantissa_digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
            mantissa_digits += 1;
        }
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }
    t[..end].parse().ok()
}

// ─────────────────────────────────────────────────────────────────────
// Declared types
// ─────────────────────────────────────────────────────────────────────

/// The type a variable is declared with.
///
/// Serialized with the learner-facing tags `entier`, `reel`, `chaine`
/// and `booleen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclaredType {
    #[serde(rename = "entier", alias = "integer")]
    Integer,
    #[serde(rename = "reel", alias = "real")]
    Real,
    #[serde(rename = "chaine", alias = "string")]
    Text,
    #[serde(rename = "booleen", alias = "boolean")]
    Boolean,
}

/// Returned when a declared type tag is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown variable type '{0}'")]
pub struct UnknownTypeError(pub String);

impl DeclaredType {
    /// All declared types, in palette order.
    pub const ALL: [DeclaredType; 4] = [
        DeclaredType::Integer,
        DeclaredType::Real,
        DeclaredType::Text,
        DeclaredType::Boolean,
    ];

    /// The learner-facing tag.
    pub fn as_str(self) -> &'static str {
        match self {
            DeclaredType::Integer => "entier",
            DeclaredType::Real => "reel",
            DeclaredType::Text => "chaine",
            DeclaredType::Boolean => "booleen",
        }
    }

    /// Value a declaration gets when no initial value is given.
    pub fn default_value(self) -> Value {
        match self {
            DeclaredType::Integer | DeclaredType::Real => Value::Number(0.0),
            DeclaredType::Text => Value::String(String::new()),
            DeclaredType::Boolean => Value::Bool(false),
        }
    }

    /// Convert raw user input for a `read` step.
    ///
    /// `entier` takes the leading integer, `reel` the leading decimal
    /// number, any other type keeps the raw text. `None` when a numeric
    /// type finds no number.
    pub fn parse_input(self, raw: &str) -> Option<Value> {
        match self {
            DeclaredType::Integer => parse_int_prefix(raw).map(Value::Number),
            DeclaredType::Real => parse_float_prefix(raw).map(Value::Number),
            DeclaredType::Text | DeclaredType::Boolean => Some(Value::String(raw.to_string())),
        }
    }

    /// Convert a literal typed into a declaration's initial-value field.
    pub fn coerce_literal(self, raw: &str) -> Option<Value> {
        let t = raw.trim();
        match self {
            DeclaredType::Integer => {
                if t.is_empty() {
                    return Some(self.default_value());
                }
                let n = string_to_number(t);
                (!n.is_nan()).then(|| Value::Number(n.trunc()))
            }
            DeclaredType::Real => {
                if t.is_empty() {
                    return Some(self.default_value());
                }
                let n = string_to_number(t);
                (!n.is_nan()).then_some(Value::Number(n))
            }
            DeclaredType::Text => Some(Value::String(strip_quotes(raw).to_string())),
            DeclaredType::Boolean => match t.to_lowercase().as_str() {
                "" | "false" | "faux" | "0" => Some(Value::Bool(false)),
                "true" | "vrai" | "1" => Some(Value::Bool(true)),
                _ => None,
            },
        }
    }

    /// Convert a numeric initial value.
    pub fn coerce_number(self, n: f64) -> Value {
        match self {
            DeclaredType::Integer => Value::Number(n.trunc()),
            DeclaredType::Real => Value::Number(n),
            DeclaredType::Text => Value::String(format_number(n)),
            DeclaredType::Boolean => Value::Bool(n != 0.0),
        }
    }
}

fn strip_quotes(raw: &str) -> &str {
    let t = raw.trim();
    for quote in ['"', '\''] {
        if t.len() >= 2 && t.starts_with(quote) && t.ends_with(quote) {
            return &t[1..t.len() - 1];
        }
    }
    raw
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeclaredType {
    type Err = UnknownTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entier" | "integer" | "int" => Ok(DeclaredType::Integer),
            "reel" | "réel" | "real" | "float" => Ok(DeclaredType::Real),
            "chaine" | "chaîne" | "string" | "text" => Ok(DeclaredType::Text),
            "booleen" | "booléen" | "boolean" | "bool" => Ok(DeclaredType::Boolean),
            _ => Err(UnknownTypeError(s.to_string())),
        }
    }
}
