//! Blocks: ids, type tags, the closed set of block kinds and the property
//! bag used to edit them.
//!
//! Editing goes through an open [`Properties`] map (name -> text or number),
//! which is validated into a [`BlockKind`] variant on construction and on
//! every edit. Keys and type tags are accepted in English and in the French
//! vocabulary of the block palette.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use algo_lexer::TokenKind;
use algo_types::{DeclaredType, Value};
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

// ══════════════════════════════════════════════════════════════════════════════
// Block ids
// ══════════════════════════════════════════════════════════════════════════════

/// Identifier of a block inside one graph, displayed as `block-N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BlockId(pub u32);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block-{}", self.0)
    }
}

impl FromStr for BlockId {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_prefix("block-")
            .and_then(|n| n.parse().ok())
            .map(BlockId)
            .ok_or_else(|| GraphError::InvalidBlockId {
                text: s.to_string(),
            })
    }
}

impl From<BlockId> for String {
    fn from(id: BlockId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for BlockId {
    type Error = GraphError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Tags
// ══════════════════════════════════════════════════════════════════════════════

/// Operator marker blocks. They carry no properties and never execute
/// anything; they exist so the palette can teach the operator vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperatorKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    And,
    Or,
    Not,
}

impl OperatorKind {
    pub const ALL: [OperatorKind; 14] = [
        OperatorKind::Addition,
        OperatorKind::Subtraction,
        OperatorKind::Multiplication,
        OperatorKind::Division,
        OperatorKind::Modulo,
        OperatorKind::Equal,
        OperatorKind::NotEqual,
        OperatorKind::Less,
        OperatorKind::Greater,
        OperatorKind::LessEqual,
        OperatorKind::GreaterEqual,
        OperatorKind::And,
        OperatorKind::Or,
        OperatorKind::Not,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OperatorKind::Addition => "addition",
            OperatorKind::Subtraction => "subtraction",
            OperatorKind::Multiplication => "multiplication",
            OperatorKind::Division => "division",
            OperatorKind::Modulo => "modulo",
            OperatorKind::Equal => "equal",
            OperatorKind::NotEqual => "not-equal",
            OperatorKind::Less => "less",
            OperatorKind::Greater => "greater",
            OperatorKind::LessEqual => "less-equal",
            OperatorKind::GreaterEqual => "greater-equal",
            OperatorKind::And => "and",
            OperatorKind::Or => "or",
            OperatorKind::Not => "not",
        }
    }

    /// The operator as written inside an expression.
    pub fn symbol(self) -> &'static str {
        match self {
            OperatorKind::Addition => "+",
            OperatorKind::Subtraction => "-",
            OperatorKind::Multiplication => "*",
            OperatorKind::Division => "/",
            OperatorKind::Modulo => "%",
            OperatorKind::Equal => "==",
            OperatorKind::NotEqual => "!=",
            OperatorKind::Less => "<",
            OperatorKind::Greater => ">",
            OperatorKind::LessEqual => "<=",
            OperatorKind::GreaterEqual => ">=",
            OperatorKind::And => "ET",
            OperatorKind::Or => "OU",
            OperatorKind::Not => "NON",
        }
    }

    fn from_name(name: &str) -> Option<OperatorKind> {
        Some(match name {
            "addition" => OperatorKind::Addition,
            "subtraction" | "soustraction" => OperatorKind::Subtraction,
            "multiplication" => OperatorKind::Multiplication,
            "division" => OperatorKind::Division,
            "modulo" => OperatorKind::Modulo,
            "equal" | "egal" => OperatorKind::Equal,
            "not-equal" | "different" => OperatorKind::NotEqual,
            "less" | "inferieur" => OperatorKind::Less,
            "greater" | "superieur" => OperatorKind::Greater,
            "less-equal" | "inferieur_egal" => OperatorKind::LessEqual,
            "greater-equal" | "superieur_egal" => OperatorKind::GreaterEqual,
            "and" | "et" => OperatorKind::And,
            "or" | "ou" => OperatorKind::Or,
            "not" | "non" => OperatorKind::Not,
            _ => return None,
        })
    }
}

/// The type tag of a block, without its properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BlockTag {
    Declare,
    Assign,
    Read,
    Write,
    Display,
    If,
    IfElse,
    While,
    For,
    Function,
    Call,
    Return,
    Operator(OperatorKind),
    Literal(DeclaredType),
}

impl BlockTag {
    /// Flow blocks, in palette order.
    pub const FLOW: [BlockTag; 12] = [
        BlockTag::Declare,
        BlockTag::Assign,
        BlockTag::Read,
        BlockTag::Write,
        BlockTag::Display,
        BlockTag::If,
        BlockTag::IfElse,
        BlockTag::For,
        BlockTag::While,
        BlockTag::Function,
        BlockTag::Call,
        BlockTag::Return,
    ];

    /// Every tag of the palette: flow blocks, then operators, then literals.
    pub fn all() -> Vec<BlockTag> {
        let mut tags = BlockTag::FLOW.to_vec();
        tags.extend(OperatorKind::ALL.into_iter().map(BlockTag::Operator));
        tags.extend(DeclaredType::ALL.into_iter().map(BlockTag::Literal));
        tags
    }

    /// Operator and literal markers: no connection points, no effect.
    pub fn is_marker(self) -> bool {
        matches!(self, BlockTag::Operator(_) | BlockTag::Literal(_))
    }

    pub fn is_conditional(self) -> bool {
        matches!(self, BlockTag::If | BlockTag::IfElse)
    }

    pub fn is_loop(self) -> bool {
        matches!(self, BlockTag::While | BlockTag::For)
    }

    /// Whether edges leaving this block may carry a `true`/`false` tag.
    pub fn allows_branch(self) -> bool {
        self.is_conditional() || self.is_loop()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockTag::Declare => "declare",
            BlockTag::Assign => "assign",
            BlockTag::Read => "read",
            BlockTag::Write => "write",
            BlockTag::Display => "display",
            BlockTag::If => "if",
            BlockTag::IfElse => "if-else",
            BlockTag::While => "while",
            BlockTag::For => "for",
            BlockTag::Function => "function",
            BlockTag::Call => "call",
            BlockTag::Return => "return",
            BlockTag::Operator(op) => op.as_str(),
            BlockTag::Literal(ty) => ty.as_str(),
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockTag {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        let tag = match name.as_str() {
            "declare" | "declarer" => BlockTag::Declare,
            "assign" | "affecter" => BlockTag::Assign,
            "read" | "lire" => BlockTag::Read,
            "write" | "ecrire" => BlockTag::Write,
            "display" | "afficher" => BlockTag::Display,
            "if" | "si" => BlockTag::If,
            "if-else" | "if_else" | "si_sinon" => BlockTag::IfElse,
            "while" | "tant_que" => BlockTag::While,
            "for" | "pour" => BlockTag::For,
            "function" | "fonction" => BlockTag::Function,
            "call" | "appel" => BlockTag::Call,
            "return" | "retourner" => BlockTag::Return,
            other => {
                if let Some(op) = OperatorKind::from_name(other) {
                    BlockTag::Operator(op)
                } else if let Ok(ty) = other.parse::<DeclaredType>() {
                    BlockTag::Literal(ty)
                } else {
                    return Err(GraphError::UnknownBlockType {
                        tag: s.to_string(),
                    });
                }
            }
        };
        Ok(tag)
    }
}

impl From<BlockTag> for String {
    fn from(tag: BlockTag) -> Self {
        tag.as_str().to_string()
    }
}

impl TryFrom<String> for BlockTag {
    type Error = GraphError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Property bag
// ══════════════════════════════════════════════════════════════════════════════

/// A property value as typed into the property panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
}

impl PropertyValue {
    /// The value as text; numbers print the way the console prints them.
    pub fn as_text(&self) -> String {
        match self {
            PropertyValue::Number(n) => Value::Number(*n).to_string(),
            PropertyValue::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        PropertyValue::Number(n)
    }
}

impl From<i32> for PropertyValue {
    fn from(n: i32) -> Self {
        PropertyValue::Number(f64::from(n))
    }
}

/// The open editing interface of a block.
pub type Properties = BTreeMap<String, PropertyValue>;

/// Canonical property keys of each tag, with their accepted aliases.
fn property_keys(tag: BlockTag) -> &'static [(&'static str, &'static [&'static str])] {
    match tag {
        BlockTag::Declare => &[
            ("name", &["nom"]),
            ("declaredType", &["type"]),
            ("initialValue", &["valeur", "value"]),
        ],
        BlockTag::Assign => &[("variable", &[]), ("value", &["valeur"])],
        BlockTag::Read => &[("variable", &[]), ("declaredType", &["type"])],
        BlockTag::Write | BlockTag::Return => &[("value", &["valeur"])],
        BlockTag::Display => &[("message", &[])],
        BlockTag::If | BlockTag::IfElse | BlockTag::While => &[("condition", &[])],
        BlockTag::For => &[
            ("counterName", &["compteur", "counter"]),
            ("from", &["de"]),
            ("to", &["a"]),
            ("step", &["pas"]),
        ],
        BlockTag::Function => &[("name", &["nom"]), ("parameters", &["parametres"])],
        BlockTag::Call => &[
            ("functionName", &["nomFonction", "function"]),
            ("parameters", &["parametres"]),
        ],
        BlockTag::Operator(_) | BlockTag::Literal(_) => &[],
    }
}

fn canonical_key(tag: BlockTag, key: &str) -> GraphResult<&'static str> {
    property_keys(tag)
        .iter()
        .find(|(canonical, aliases)| *canonical == key || aliases.contains(&key))
        .map(|(canonical, _)| *canonical)
        .ok_or_else(|| GraphError::InvalidProperty {
            tag,
            key: key.to_string(),
            reason: format!("{tag} blocks have no such property"),
        })
}

// ══════════════════════════════════════════════════════════════════════════════
// Block kinds
// ══════════════════════════════════════════════════════════════════════════════

/// A block's type together with exactly the properties that type recognises.
///
/// Expression-valued properties (`value`, `message`, `condition`, loop
/// bounds) are kept as text and evaluated when the block runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum BlockKind {
    Declare {
        name: String,
        declared_type: DeclaredType,
        initial_value: Value,
    },
    Assign {
        variable: String,
        value: String,
    },
    Read {
        variable: String,
        /// Conversion applied to the input; `None` uses the variable's type.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        declared_type: Option<DeclaredType>,
    },
    Write {
        value: String,
    },
    Display {
        message: String,
    },
    If {
        condition: String,
    },
    IfElse {
        condition: String,
    },
    While {
        condition: String,
    },
    For {
        counter_name: String,
        from: String,
        to: String,
        step: String,
    },
    Function {
        name: String,
        parameters: Vec<String>,
    },
    Call {
        function_name: String,
        parameters: String,
    },
    Return {
        value: String,
    },
    Operator {
        op: OperatorKind,
    },
    Literal {
        literal: DeclaredType,
    },
}

impl BlockKind {
    pub fn tag(&self) -> BlockTag {
        match self {
            BlockKind::Declare { .. } => BlockTag::Declare,
            BlockKind::Assign { .. } => BlockTag::Assign,
            BlockKind::Read { .. } => BlockTag::Read,
            BlockKind::Write { .. } => BlockTag::Write,
            BlockKind::Display { .. } => BlockTag::Display,
            BlockKind::If { .. } => BlockTag::If,
            BlockKind::IfElse { .. } => BlockTag::IfElse,
            BlockKind::While { .. } => BlockTag::While,
            BlockKind::For { .. } => BlockTag::For,
            BlockKind::Function { .. } => BlockTag::Function,
            BlockKind::Call { .. } => BlockTag::Call,
            BlockKind::Return { .. } => BlockTag::Return,
            BlockKind::Operator { op } => BlockTag::Operator(*op),
            BlockKind::Literal { literal } => BlockTag::Literal(*literal),
        }
    }

    /// The block as it comes out of the palette.
    pub fn default_for(tag: BlockTag) -> BlockKind {
        match tag {
            BlockTag::Declare => BlockKind::Declare {
                name: "maVariable".into(),
                declared_type: DeclaredType::Integer,
                initial_value: Value::Number(0.0),
            },
            BlockTag::Assign => BlockKind::Assign {
                variable: "maVariable".into(),
                value: "0".into(),
            },
            BlockTag::Read => BlockKind::Read {
                variable: "maVariable".into(),
                declared_type: Some(DeclaredType::Integer),
            },
            BlockTag::Write => BlockKind::Write {
                value: "maVariable".into(),
            },
            BlockTag::Display => BlockKind::Display {
                message: "\"Bonjour le monde !\"".into(),
            },
            BlockTag::If => BlockKind::If {
                condition: "maVariable == 10".into(),
            },
            BlockTag::IfElse => BlockKind::IfElse {
                condition: "maVariable == 10".into(),
            },
            BlockTag::While => BlockKind::While {
                condition: "i < 10".into(),
            },
            BlockTag::For => BlockKind::For {
                counter_name: "i".into(),
                from: "1".into(),
                to: "10".into(),
                step: "1".into(),
            },
            BlockTag::Function => BlockKind::Function {
                name: "maFonction".into(),
                parameters: Vec::new(),
            },
            BlockTag::Call => BlockKind::Call {
                function_name: "maFonction".into(),
                parameters: String::new(),
            },
            BlockTag::Return => BlockKind::Return {
                value: "0".into(),
            },
            BlockTag::Operator(op) => BlockKind::Operator { op },
            BlockTag::Literal(literal) => BlockKind::Literal { literal },
        }
    }

    /// Build a block of `tag` from palette defaults overlaid with `edits`.
    pub fn from_properties(tag: BlockTag, edits: &Properties) -> GraphResult<BlockKind> {
        let mut props = BlockKind::default_for(tag).properties();
        for (key, value) in edits {
            props.insert(canonical_key(tag, key)?.to_string(), value.clone());
        }
        build(tag, &props)
    }

    /// A copy of this block with one property changed and revalidated.
    pub fn with_property(&self, key: &str, value: PropertyValue) -> GraphResult<BlockKind> {
        let tag = self.tag();
        let mut props = self.properties();
        props.insert(canonical_key(tag, key)?.to_string(), value);
        build(tag, &props)
    }

    /// The block's properties under their canonical keys.
    pub fn properties(&self) -> Properties {
        let mut props = Properties::new();
        let mut put = |key: &str, value: PropertyValue| {
            props.insert(key.to_string(), value);
        };
        match self {
            BlockKind::Declare {
                name,
                declared_type,
                initial_value,
            } => {
                put("name", name.as_str().into());
                put("declaredType", declared_type.as_str().into());
                let initial = match initial_value {
                    Value::Number(n) => PropertyValue::Number(*n),
                    other => PropertyValue::Text(other.to_string()),
                };
                put("initialValue", initial);
            }
            BlockKind::Assign { variable, value } => {
                put("variable", variable.as_str().into());
                put("value", value.as_str().into());
            }
            BlockKind::Read {
                variable,
                declared_type,
            } => {
                put("variable", variable.as_str().into());
                put(
                    "declaredType",
                    declared_type.map(|t| t.as_str()).unwrap_or("").into(),
                );
            }
            BlockKind::Write { value } | BlockKind::Return { value } => {
                put("value", value.as_str().into());
            }
            BlockKind::Display { message } => put("message", message.as_str().into()),
            BlockKind::If { condition }
            | BlockKind::IfElse { condition }
            | BlockKind::While { condition } => put("condition", condition.as_str().into()),
            BlockKind::For {
                counter_name,
                from,
                to,
                step,
            } => {
                put("counterName", counter_name.as_str().into());
                put("from", from.as_str().into());
                put("to", to.as_str().into());
                put("step", step.as_str().into());
            }
            BlockKind::Function { name, parameters } => {
                put("name", name.as_str().into());
                put("parameters", parameters.join(", ").into());
            }
            BlockKind::Call {
                function_name,
                parameters,
            } => {
                put("functionName", function_name.as_str().into());
                put("parameters", parameters.as_str().into());
            }
            BlockKind::Operator { .. } | BlockKind::Literal { .. } => {}
        }
        props
    }

    /// A one-line label, as shown on the canvas.
    pub fn label(&self) -> String {
        match self {
            BlockKind::Declare {
                name,
                declared_type,
                initial_value,
            } => format!("declare {name} : {declared_type} = {initial_value}"),
            BlockKind::Assign { variable, value } => format!("{variable} <- {value}"),
            BlockKind::Read { variable, .. } => format!("read {variable}"),
            BlockKind::Write { value } => format!("write {value}"),
            BlockKind::Display { message } => format!("display {message}"),
            BlockKind::If { condition } => format!("if {condition}"),
            BlockKind::IfElse { condition } => format!("if {condition} else"),
            BlockKind::While { condition } => format!("while {condition}"),
            BlockKind::For {
                counter_name,
                from,
                to,
                step,
            } => format!("for {counter_name} from {from} to {to} step {step}"),
            BlockKind::Function { name, parameters } => {
                format!("function {name}({})", parameters.join(", "))
            }
            BlockKind::Call {
                function_name,
                parameters,
            } => format!("call {function_name}({parameters})"),
            BlockKind::Return { value } => format!("return {value}"),
            BlockKind::Operator { op } => op.symbol().to_string(),
            BlockKind::Literal { literal } => literal.to_string(),
        }
    }
}

// ── Validation ──────────────────────────────────────────────────────────────

fn invalid(tag: BlockTag, key: &str, reason: impl Into<String>) -> GraphError {
    GraphError::InvalidProperty {
        tag,
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn text(props: &Properties, key: &str) -> String {
    props.get(key).map(PropertyValue::as_text).unwrap_or_default()
}

fn required_text(tag: BlockTag, props: &Properties, key: &str) -> GraphResult<String> {
    let value = text(props, key).trim().to_string();
    if value.is_empty() {
        return Err(invalid(tag, key, "a value is required"));
    }
    Ok(value)
}

/// A variable name: a letter or `_`, then letters, digits or `_`, and not
/// one of the expression keywords.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && TokenKind::from_keyword(name).is_none()
}

fn variable_name(tag: BlockTag, props: &Properties, key: &str) -> GraphResult<String> {
    let name = required_text(tag, props, key)?;
    if !is_valid_name(&name) {
        return Err(invalid(
            tag,
            key,
            format!("'{name}' is not a valid variable name"),
        ));
    }
    Ok(name)
}

fn parse_declared_type(tag: BlockTag, props: &Properties, key: &str) -> GraphResult<DeclaredType> {
    text(props, key)
        .parse()
        .map_err(|e: algo_types::UnknownTypeError| invalid(tag, key, e.to_string()))
}

fn build(tag: BlockTag, props: &Properties) -> GraphResult<BlockKind> {
    let kind = match tag {
        BlockTag::Declare => {
            let name = variable_name(tag, props, "name")?;
            let ty = parse_declared_type(tag, props, "declaredType")?;
            let initial_value = match props.get("initialValue") {
                None => ty.default_value(),
                Some(PropertyValue::Number(n)) => ty.coerce_number(*n),
                Some(PropertyValue::Text(raw)) => ty.coerce_literal(raw).ok_or_else(|| {
                    invalid(
                        tag,
                        "initialValue",
                        format!("'{raw}' is not a valid {ty} value"),
                    )
                })?,
            };
            BlockKind::Declare {
                name,
                declared_type: ty,
                initial_value,
            }
        }
        BlockTag::Assign => BlockKind::Assign {
            variable: variable_name(tag, props, "variable")?,
            value: required_text(tag, props, "value")?,
        },
        BlockTag::Read => {
            let declared_type = if text(props, "declaredType").trim().is_empty() {
                None
            } else {
                Some(parse_declared_type(tag, props, "declaredType")?)
            };
            BlockKind::Read {
                variable: variable_name(tag, props, "variable")?,
                declared_type,
            }
        }
        BlockTag::Write => BlockKind::Write {
            value: required_text(tag, props, "value")?,
        },
        BlockTag::Return => BlockKind::Return {
            value: text(props, "value").trim().to_string(),
        },
        BlockTag::Display => BlockKind::Display {
            message: required_text(tag, props, "message")?,
        },
        BlockTag::If => BlockKind::If {
            condition: required_text(tag, props, "condition")?,
        },
        BlockTag::IfElse => BlockKind::IfElse {
            condition: required_text(tag, props, "condition")?,
        },
        BlockTag::While => BlockKind::While {
            condition: required_text(tag, props, "condition")?,
        },
        BlockTag::For => {
            let step = text(props, "step").trim().to_string();
            BlockKind::For {
                counter_name: variable_name(tag, props, "counterName")?,
                from: required_text(tag, props, "from")?,
                to: required_text(tag, props, "to")?,
                step: if step.is_empty() { "1".into() } else { step },
            }
        }
        BlockTag::Function => BlockKind::Function {
            name: required_text(tag, props, "name")?,
            parameters: text(props, "parameters")
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect(),
        },
        BlockTag::Call => BlockKind::Call {
            function_name: required_text(tag, props, "functionName")?,
            parameters: text(props, "parameters").trim().to_string(),
        },
        BlockTag::Operator(op) => BlockKind::Operator { op },
        BlockTag::Literal(literal) => BlockKind::Literal { literal },
    };
    Ok(kind)
}

// ══════════════════════════════════════════════════════════════════════════════
// Blocks
// ══════════════════════════════════════════════════════════════════════════════

/// A placed block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl Block {
    pub fn tag(&self) -> BlockTag {
        self.kind.tag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, PropertyValue)]) -> Properties {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_block_id_display_and_parse() {
        assert_eq!(BlockId(7).to_string(), "block-7");
        assert_eq!("block-12".parse::<BlockId>(), Ok(BlockId(12)));
        assert!("bloc-1".parse::<BlockId>().is_err());
    }

    #[test]
    fn test_tags_accept_french_vocabulary() {
        assert_eq!("si_sinon".parse::<BlockTag>(), Ok(BlockTag::IfElse));
        assert_eq!("tant_que".parse::<BlockTag>(), Ok(BlockTag::While));
        assert_eq!("Afficher".parse::<BlockTag>(), Ok(BlockTag::Display));
        assert_eq!(
            "inferieur_egal".parse::<BlockTag>(),
            Ok(BlockTag::Operator(OperatorKind::LessEqual))
        );
        assert_eq!(
            "chaine".parse::<BlockTag>(),
            Ok(BlockTag::Literal(DeclaredType::Text))
        );
        assert!(matches!(
            "boucle".parse::<BlockTag>(),
            Err(GraphError::UnknownBlockType { .. })
        ));
    }

    #[test]
    fn test_every_tag_round_trips_through_its_name() {
        for tag in BlockTag::all() {
            assert_eq!(tag.to_string().parse::<BlockTag>(), Ok(tag), "{tag}");
        }
        assert_eq!(BlockTag::all().len(), 30);
    }

    #[test]
    fn test_palette_defaults_validate() {
        for tag in BlockTag::all() {
            let kind = BlockKind::default_for(tag);
            assert_eq!(
                BlockKind::from_properties(tag, &Properties::new()),
                Ok(kind.clone()),
                "{tag}"
            );
            assert_eq!(kind.tag(), tag);
        }
    }

    #[test]
    fn test_declare_with_french_keys() {
        let kind = BlockKind::from_properties(
            BlockTag::Declare,
            &props(&[
                ("nom", "Somme".into()),
                ("type", "entier".into()),
                ("valeur", 0.into()),
            ]),
        )
        .unwrap();
        assert_eq!(
            kind,
            BlockKind::Declare {
                name: "Somme".into(),
                declared_type: DeclaredType::Integer,
                initial_value: Value::Number(0.0),
            }
        );
    }

    #[test]
    fn test_declare_initial_value_is_coerced() {
        let kind = BlockKind::from_properties(
            BlockTag::Declare,
            &props(&[("type", "reel".into()), ("valeur", "2.5".into())]),
        )
        .unwrap();
        assert!(matches!(
            kind,
            BlockKind::Declare { initial_value: Value::Number(n), .. } if n == 2.5
        ));

        let err = BlockKind::from_properties(
            BlockTag::Declare,
            &props(&[("type", "booleen".into()), ("valeur", "peut-être".into())]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GraphError::InvalidProperty { ref key, .. } if key == "initialValue"
        ));
    }

    #[test]
    fn test_changing_declared_type_recoerces_value() {
        let kind = BlockKind::default_for(BlockTag::Declare);
        let text = kind.with_property("type", "chaine".into()).unwrap();
        assert!(matches!(
            text,
            BlockKind::Declare { initial_value: Value::String(ref s), .. } if s == "0"
        ));
    }

    #[test]
    fn test_unknown_property_rejected() {
        let err = BlockKind::default_for(BlockTag::Display)
            .with_property("condition", "x".into())
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidProperty { .. }));
    }

    #[test]
    fn test_invalid_variable_names() {
        assert!(is_valid_name("âge"));
        assert!(is_valid_name("_tmp2"));
        assert!(!is_valid_name("2x"));
        assert!(!is_valid_name("ma variable"));
        assert!(!is_valid_name("ET"));
        let err = BlockKind::default_for(BlockTag::Assign)
            .with_property("variable", "a b".into())
            .unwrap_err();
        assert!(err.to_string().contains("not a valid variable name"));
    }

    #[test]
    fn test_for_numeric_bounds_become_text() {
        let kind = BlockKind::from_properties(
            BlockTag::For,
            &props(&[("de", 1.into()), ("a", 5.into()), ("pas", "".into())]),
        )
        .unwrap();
        assert_eq!(
            kind,
            BlockKind::For {
                counter_name: "i".into(),
                from: "1".into(),
                to: "5".into(),
                step: "1".into(),
            }
        );
    }

    #[test]
    fn test_read_type_can_be_cleared() {
        let kind = BlockKind::default_for(BlockTag::Read)
            .with_property("type", "".into())
            .unwrap();
        assert!(matches!(kind, BlockKind::Read { declared_type: None, .. }));
    }

    #[test]
    fn test_function_parameters_split() {
        let kind = BlockKind::default_for(BlockTag::Function)
            .with_property("parametres", "a, b,".into())
            .unwrap();
        assert_eq!(
            kind,
            BlockKind::Function {
                name: "maFonction".into(),
                parameters: vec!["a".into(), "b".into()],
            }
        );
    }

    #[test]
    fn test_block_json_shape() {
        let block = Block {
            id: BlockId(3),
            kind: BlockKind::default_for(BlockTag::IfElse),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["id"], "block-3");
        assert_eq!(json["type"], "if-else");
        assert_eq!(json["condition"], "maVariable == 10");
        let back: Block = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
    }
}
