//! Arithmetic sub-evaluator.
//!
//! A recursive-descent parser that evaluates while it parses:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/' | '%') factor)*
//! factor     := ('+' | '-') factor | power
//! power      := atom ('^' signed)*          left to right
//! signed     := ('+' | '-') signed | atom
//! atom       := '(' expression ')' | number | identifier ['(' expression ')']
//! ```
//!
//! All arithmetic is carried out in `f64`; `%` is the floating remainder
//! and takes the sign of the dividend. An identifier directly followed by
//! `(` is a grouping, not a call; a bare identifier is a variable lookup
//! that must produce a number.
//!
//! Every cycle in the grammar passes through `factor` or `signed`, and both
//! grow the stack on demand.

use crate::environment::Environment;
use crate::errors::{syntax_error, type_mismatch, unexpected_char, EvalResult};
use crate::stack::ensure_sufficient_stack;
use crate::text::identifier_len;

/// Evaluate `expr` as arithmetic against `env`.
pub(super) fn evaluate_arithmetic(expr: &str, env: &Environment) -> EvalResult<f64> {
    let mut parser = ArithParser {
        src: expr,
        pos: 0,
        env,
    };
    let value = parser.expression()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(value),
        Some(ch) => Err(unexpected_char(ch, expr)),
    }
}

struct ArithParser<'a> {
    src: &'a str,
    pos: usize,
    env: &'a Environment,
}

impl ArithParser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.src[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Consume `ch` if it is the next non-blank character.
    fn eat(&mut self, ch: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn expression(&mut self) -> EvalResult<f64> {
        let mut value = self.term()?;
        loop {
            if self.eat('+') {
                value += self.term()?;
            } else if self.eat('-') {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self) -> EvalResult<f64> {
        let mut value = self.factor()?;
        loop {
            if self.eat('*') {
                value *= self.factor()?;
            } else if self.eat('/') {
                value /= self.factor()?;
            } else if self.eat('%') {
                value %= self.factor()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn factor(&mut self) -> EvalResult<f64> {
        ensure_sufficient_stack(|| {
            if self.eat('+') {
                return self.factor();
            }
            if self.eat('-') {
                return Ok(-self.factor()?);
            }
            self.power()
        })
    }

    fn power(&mut self) -> EvalResult<f64> {
        let mut value = self.atom()?;
        while self.eat('^') {
            value = value.powf(self.signed()?);
        }
        Ok(value)
    }

    fn signed(&mut self) -> EvalResult<f64> {
        ensure_sufficient_stack(|| {
            if self.eat('+') {
                return self.signed();
            }
            if self.eat('-') {
                return Ok(-self.signed()?);
            }
            self.atom()
        })
    }

    fn atom(&mut self) -> EvalResult<f64> {
        self.skip_whitespace();
        match self.peek() {
            Some('(') => self.group(),
            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.number(),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.identifier(),
            Some(ch) => Err(unexpected_char(ch, self.src)),
            None => Err(syntax_error(format!(
                "unexpected end of expression `{}`",
                self.src
            ))),
        }
    }

    /// `'(' expression ')'`, positioned on the `(`.
    fn group(&mut self) -> EvalResult<f64> {
        self.eat('(');
        let value = self.expression()?;
        if self.eat(')') {
            Ok(value)
        } else {
            Err(syntax_error(format!("missing `)` in `{}`", self.src)))
        }
    }

    fn number(&mut self) -> EvalResult<f64> {
        let rest = &self.src[self.pos..];
        let len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let text = &rest[..len];
        self.pos += len;
        text.parse()
            .map_err(|_| syntax_error(format!("invalid number `{text}`")))
    }

    fn identifier(&mut self) -> EvalResult<f64> {
        let len = identifier_len(&self.src[self.pos..]);
        let name = &self.src[self.pos..self.pos + len];
        self.pos += len;

        self.skip_whitespace();
        if self.peek() == Some('(') {
            return self.group();
        }

        let value = self.env.lookup_variable(name)?;
        value
            .as_number()
            .ok_or_else(|| type_mismatch("a number", format!("{} `{name}`", value.type_name())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use crate::EvalError;

    fn eval(expr: &str) -> f64 {
        let env = Environment::new();
        env.set_variable("x", Value::int(4));
        env.set_variable("half", Value::float(0.5));
        env.set_variable("name", Value::string("n"));
        evaluate_arithmetic(expr, &env).unwrap_or_else(|e| panic!("`{expr}` failed: {e}"))
    }

    fn eval_err(expr: &str) -> EvalError {
        let env = Environment::new();
        env.set_variable("name", Value::string("n"));
        match evaluate_arithmetic(expr, &env) {
            Ok(value) => panic!("`{expr}` evaluated to {value}"),
            Err(e) => e,
        }
    }

    #[test]
    #[allow(clippy::float_cmp, reason = "results are exact")]
    fn precedence_and_grouping() {
        assert_eq!(eval("2 + 3 * 4"), 14.0);
        assert_eq!(eval("(2+3)*4"), 20.0);
        assert_eq!(eval("10 - 4 - 3"), 3.0);
        assert_eq!(eval("8 / 4 / 2"), 1.0);
    }

    #[test]
    #[allow(clippy::float_cmp, reason = "results are exact")]
    fn power_is_left_to_right() {
        assert_eq!(eval("2^3^2"), 64.0);
        assert_eq!(eval("2^-1"), 0.5);
        assert_eq!(eval("-2^2"), -4.0);
    }

    #[test]
    #[allow(clippy::float_cmp, reason = "results are exact")]
    fn identifiers_and_groupings() {
        assert_eq!(eval("x * half"), 2.0);
        assert_eq!(eval("x_sq(3 + 1) * 2"), 8.0);
        assert_eq!(eval("-x + 1"), -3.0);
    }

    #[test]
    #[allow(clippy::float_cmp, reason = "results are exact")]
    fn remainder_binds_like_multiplication() {
        assert_eq!(eval("7 % 3"), 1.0);
        assert_eq!(eval("1 + 7 % 3 * 2"), 3.0);
        assert_eq!(eval("-7 % 3"), -1.0);
        assert_eq!(eval("7.5 % 2"), 1.5);
        assert!(eval("x % 0").is_nan());
    }

    #[test]
    #[allow(clippy::float_cmp, reason = "results are exact")]
    fn deep_nesting_grows_the_stack() {
        let depth = 100_000;
        let nested = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(eval(&nested), 1.0);

        let negations = format!("{}1 + 0", "-".repeat(200_000));
        assert_eq!(eval(&negations), 1.0);

        let exponent = format!("2^{}1", "-".repeat(100_001));
        assert_eq!(eval(&exponent), 0.5);
    }

    #[test]
    fn errors() {
        assert!(matches!(eval_err("y + 1"), EvalError::UndefinedVariable { .. }));
        assert!(matches!(eval_err("name * 2"), EvalError::TypeMismatch { .. }));
        assert!(matches!(eval_err("(1 + 2"), EvalError::Syntax { .. }));
        assert!(matches!(eval_err("1 + 2)"), EvalError::Syntax { .. }));
        assert!(matches!(eval_err("1 +"), EvalError::Syntax { .. }));
        assert!(matches!(eval_err("1 $ 2"), EvalError::Syntax { .. }));
        assert!(matches!(eval_err("1..2"), EvalError::Syntax { .. }));
    }
}
