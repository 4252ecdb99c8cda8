//! Function invocation.

use std::rc::Rc;

use super::Interpreter;
use crate::environment::Environment;
use crate::errors::{
    argument_count_mismatch, syntax_error, type_mismatch, undefined_function, EvalResult,
};
use crate::statement::Statement;
use crate::text::block_end;
use crate::typecheck::check_type;
use crate::value::{Function, ReturnType, Value};

impl Interpreter {
    /// Call `name` with raw argument expressions evaluated in `caller`.
    ///
    /// Returns `None` for a call that produced no value. The arity is
    /// checked before any argument is evaluated, so a mismatched call leaves
    /// the caller's scope untouched.
    #[tracing::instrument(level = "debug", skip_all, fields(function = name))]
    pub fn invoke(
        &self,
        name: &str,
        args: &[String],
        caller: &Environment,
    ) -> EvalResult<Option<Value>> {
        let (function, defining) = resolve_callee(name, caller)?;
        if args.len() != function.arity() {
            return Err(argument_count_mismatch(name, function.arity(), args.len()));
        }

        let _guard = self.enter_call()?;
        let scope = defining.child();
        for (param, arg) in function.params().iter().zip(args) {
            let value = self.evaluate(arg, caller)?;
            scope.set_variable(param.name.clone(), check_type(value, param.ty)?);
        }
        let result = self.run_body(&function, &scope);
        tracing::trace!(
            depth = scope.depth(),
            locals = ?scope.local_variable_names(),
            "call scope dropped"
        );
        result
    }

    /// Run body statements in order until a `return` or the end.
    ///
    /// Control-flow blocks are skipped as a whole.
    fn run_body(&self, function: &Function, scope: &Environment) -> EvalResult<Option<Value>> {
        let body = function.body();
        let mut index = 0;
        while index < body.len() {
            let text = &body[index];
            match Statement::parse(text)? {
                Statement::BlockOpen { keyword } => {
                    let end = block_end(body, index).ok_or_else(|| {
                        syntax_error(format!("unclosed `{keyword}` block in {}", function.name()))
                    })?;
                    tracing::trace!(%keyword, lines = end - index + 1, "skipping block");
                    index = end + 1;
                    continue;
                }
                Statement::Return(expr) => {
                    return self.return_value(function, expr.as_deref(), scope);
                }
                statement => self.run_statement(statement, text, scope)?,
            }
            index += 1;
        }
        Ok(None)
    }

    fn return_value(
        &self,
        function: &Function,
        expr: Option<&str>,
        scope: &Environment,
    ) -> EvalResult<Option<Value>> {
        match (function.return_type(), expr) {
            (ReturnType::Void, None) => Ok(None),
            (ReturnType::Void, Some(expr)) => self.evaluate(expr, scope).map(Some),
            (ReturnType::Value(tag), Some(expr)) => {
                check_type(self.evaluate(expr, scope)?, tag).map(Some)
            }
            (ReturnType::Value(tag), None) => Err(type_mismatch(
                tag,
                format!("no value from `return;` in {}", function.name()),
            )),
        }
    }
}

/// Find the function for `name` and the scope that defines it.
///
/// Named functions are looked up first; a variable holding a closure is
/// accepted as well, in which case the scope owning that variable acts as
/// the defining scope.
fn resolve_callee(name: &str, caller: &Environment) -> EvalResult<(Rc<Function>, Environment)> {
    if let Some(found) = caller.resolve_function(name) {
        return Ok(found);
    }
    match caller.resolve_variable(name) {
        Some((Value::Closure(closure), owner)) => Ok((Rc::clone(closure.function()), owner)),
        _ => Err(undefined_function(name)),
    }
}
