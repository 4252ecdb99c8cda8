//! Expression evaluation.

use super::arith::evaluate_arithmetic;
use super::interpolate::{interpolate, unescape};
use super::Interpreter;
use crate::environment::Environment;
use crate::errors::{syntax_error, type_mismatch, void_value, EvalResult};
use crate::stack::ensure_sufficient_stack;
use crate::text::{char_literal, is_identifier, split_call, split_ternary, string_literal};
use crate::value::Value;

impl Interpreter {
    /// Evaluate one expression against `env`.
    ///
    /// First match wins: string literal, character literal, call, bound
    /// identifier, boolean literal, negation, ternary, integer literal, then
    /// arithmetic.
    pub fn evaluate(&self, expr: &str, env: &Environment) -> EvalResult {
        ensure_sufficient_stack(|| self.evaluate_inner(expr.trim(), env))
    }

    fn evaluate_inner(&self, expr: &str, env: &Environment) -> EvalResult {
        if expr.is_empty() {
            return Err(syntax_error("empty expression"));
        }

        if let Some(body) = string_literal(expr) {
            return interpolate(&unescape(body), env).map(Value::String);
        }

        if let Some(body) = char_literal(expr) {
            let unescaped = unescape(body);
            let mut chars = unescaped.chars();
            return match (chars.next(), chars.next()) {
                (Some(ch), None) => Ok(Value::Char(ch)),
                _ => Err(syntax_error(format!("invalid character literal {expr}"))),
            };
        }

        if let Some((name, args)) = split_call(expr) {
            return self
                .invoke(name, &args, env)?
                .ok_or_else(|| void_value(name));
        }

        if is_identifier(expr) {
            if let Some(value) = env.get_variable(expr) {
                return Ok(value);
            }
        }

        match expr {
            "true" => return Ok(Value::Boolean(true)),
            "false" => return Ok(Value::Boolean(false)),
            _ => {}
        }

        if let Some(operand) = negated_operand(expr) {
            return self.evaluate_boolean(operand, env).map(|b| Value::Boolean(!b));
        }

        if let Some((cond, then_branch, else_branch)) = split_ternary(expr) {
            let branch = if self.evaluate_boolean(cond, env)? {
                then_branch
            } else {
                else_branch
            };
            return self.evaluate(branch, env);
        }

        if let Ok(n) = expr.parse::<i64>() {
            return Ok(Value::Integer(n));
        }

        evaluate_arithmetic(expr, env).map(Value::Float64)
    }

    /// Evaluate `expr`, requiring a Boolean.
    pub(super) fn evaluate_boolean(&self, expr: &str, env: &Environment) -> EvalResult<bool> {
        let value = self.evaluate(expr, env)?;
        value
            .as_bool()
            .ok_or_else(|| type_mismatch("Boolean", value.type_name()))
    }
}

/// Operand of `not expr` or `!expr`.
fn negated_operand(expr: &str) -> Option<&str> {
    if let Some(rest) = expr.strip_prefix("not") {
        if rest.starts_with(char::is_whitespace) {
            return Some(rest);
        }
    }
    expr.strip_prefix('!').filter(|rest| !rest.starts_with('='))
}
