//! Tree-walking expression evaluator.

use std::cmp::Ordering;

use algo_types::ast::*;
use algo_types::Value;

use crate::error::{EvalError, EvalResult};
use crate::store::VariableStore;

/// Walks expression trees, resolving identifiers against a store.
pub struct Evaluator<'a> {
    store: &'a VariableStore,
}

impl<'a> Evaluator<'a> {
    pub fn new(store: &'a VariableStore) -> Self {
        Self { store }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Expression evaluation
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate an expression to a Value.
    pub fn eval_expr(&self, expr: &Expr) -> EvalResult<Value> {
        match &expr.kind {
            ExprKind::NumberLit(n) => Ok(Value::Number(*n)),
            ExprKind::StringLit(s) => Ok(Value::String(s.clone())),
            ExprKind::BoolLit(b) => Ok(Value::Bool(*b)),
            ExprKind::Identifier(name) => self.eval_identifier(name),
            ExprKind::Paren(inner) => self.eval_expr(inner),
            ExprKind::Unary { op, operand } => self.eval_unary(*op, operand),
            ExprKind::Binary { left, op, right } => self.eval_binary(left, *op, right),
        }
    }

    fn eval_identifier(&self, name: &str) -> EvalResult<Value> {
        self.store
            .value(name)
            .cloned()
            .ok_or_else(|| EvalError::undeclared(name))
    }

    fn eval_unary(&self, op: UnaryOp, operand: &Expr) -> EvalResult<Value> {
        let v = self.eval_expr(operand)?;
        Ok(match op {
            UnaryOp::Neg => Value::Number(-v.to_number()),
            UnaryOp::Plus => Value::Number(v.to_number()),
            UnaryOp::Not => Value::Bool(!v.is_truthy()),
        })
    }

    fn eval_binary(&self, left: &Expr, op: BinOp, right: &Expr) -> EvalResult<Value> {
        let lv = self.eval_expr(left)?;
        // Short-circuit: the deciding operand is the result.
        let rv = match op {
            BinOp::And if !lv.is_truthy() => return Ok(lv),
            BinOp::Or if lv.is_truthy() => return Ok(lv),
            _ => self.eval_expr(right)?,
        };

        Ok(match op {
            BinOp::And | BinOp::Or => rv,
            BinOp::Add => add(&lv, &rv),
            BinOp::Sub => Value::Number(lv.to_number() - rv.to_number()),
            BinOp::Mul => Value::Number(lv.to_number() * rv.to_number()),
            BinOp::Div => Value::Number(lv.to_number() / rv.to_number()),
            BinOp::Mod => Value::Number(lv.to_number() % rv.to_number()),
            BinOp::Pow => Value::Number(lv.to_number().powf(rv.to_number())),
            BinOp::Eq => Value::Bool(lv.loose_eq(&rv)),
            BinOp::NotEq => Value::Bool(!lv.loose_eq(&rv)),
            BinOp::Less => Value::Bool(compare(&lv, &rv) == Some(Ordering::Less)),
            BinOp::Greater => Value::Bool(compare(&lv, &rv) == Some(Ordering::Greater)),
            BinOp::LessEq => Value::Bool(matches!(
                compare(&lv, &rv),
                Some(Ordering::Less | Ordering::Equal)
            )),
            BinOp::GreaterEq => Value::Bool(matches!(
                compare(&lv, &rv),
                Some(Ordering::Greater | Ordering::Equal)
            )),
        })
    }
}

/// `+` concatenates as soon as either side is text.
fn add(lv: &Value, rv: &Value) -> Value {
    match (lv, rv) {
        (Value::String(_), _) | (_, Value::String(_)) => Value::String(format!("{lv}{rv}")),
        _ => Value::Number(lv.to_number() + rv.to_number()),
    }
}

/// Two strings compare by characters; anything else numerically.
/// `None` when a side is NaN.
fn compare(lv: &Value, rv: &Value) -> Option<Ordering> {
    match (lv, rv) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => lv.to_number().partial_cmp(&rv.to_number()),
    }
}
