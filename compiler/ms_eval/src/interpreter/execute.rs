//! Statement execution.

use std::rc::Rc;

use super::interpolate::fill_placeholders;
use super::Interpreter;
use crate::config::AssignmentMode;
use crate::environment::Environment;
use crate::errors::{syntax_error, type_mismatch, EvalResult};
use crate::statement::{Statement, Step};
use crate::typecheck::check_type;
use crate::value::{TypeTag, Value};

impl Interpreter {
    /// Execute one statement, reporting any error instead of returning it.
    ///
    /// Execution of the surrounding program always continues.
    pub fn execute(&self, statement: &str, env: &Environment) {
        if let Err(error) = self.try_execute(statement, env) {
            self.report(statement, error);
        }
    }

    /// Execute one statement, returning its error.
    pub fn try_execute(&self, statement: &str, env: &Environment) -> EvalResult<()> {
        let parsed = Statement::parse(statement)?;
        self.run_statement(parsed, statement, env)
    }

    /// Run an already classified statement.
    pub(super) fn run_statement(
        &self,
        statement: Statement,
        text: &str,
        env: &Environment,
    ) -> EvalResult<()> {
        match statement {
            Statement::Empty | Statement::Comment | Statement::BlockClose => Ok(()),
            Statement::BlockOpen { keyword } => {
                tracing::debug!(%keyword, "control-flow block not executed");
                Ok(())
            }
            Statement::Return(_) => Err(syntax_error("`return` outside of a function")),
            Statement::Write { args, newline } => self.write(&args, newline, env),
            Statement::System { args } => self.system(&args, env),
            Statement::Arrow { name, closure } => {
                env.define_function(Rc::clone(closure.function()));
                env.set_variable(name, Value::Closure(closure));
                Ok(())
            }
            Statement::Declare {
                name,
                annotation,
                expr,
            } => {
                let tag = TypeTag::parse(&annotation)?;
                let value = self.evaluate(&expr, env)?;
                env.set_variable(name, check_type(value, tag)?);
                Ok(())
            }
            Statement::DeclareBool { name, expr } => {
                let value = self.evaluate_boolean(&expr, env)?;
                env.set_variable(name, Value::Boolean(value));
                Ok(())
            }
            Statement::DeclareList { name, elements } => {
                env.set_variable(name, Value::text_list(elements));
                Ok(())
            }
            Statement::Call { name, args } => {
                self.invoke(&name, &args, env)?;
                Ok(())
            }
            Statement::Step { name, step } => {
                let value = env.lookup_variable(&name)?;
                let stepped = apply_step(&value, step)?;
                self.assign(&name, stepped, env);
                Ok(())
            }
            Statement::Assign { name, expr } => {
                let value = self.evaluate(&expr, env)?;
                self.assign(&name, value, env);
                Ok(())
            }
            Statement::Expression(expr) => match self.evaluate(&expr, env) {
                Ok(_) => Ok(()),
                Err(error) if error.is_syntax() => {
                    tracing::debug!(
                        statement = %text.trim(),
                        %error,
                        "ignoring unrecognized statement"
                    );
                    Ok(())
                }
                Err(error) => Err(error),
            },
        }
    }

    /// Write `value` to `name` under the configured assignment mode.
    fn assign(&self, name: &str, value: Value, env: &Environment) {
        match self.config.assignment {
            AssignmentMode::Shadow => env.set_variable(name, value),
            AssignmentMode::Enclosing => env.assign_enclosing(name, value),
        }
    }

    /// Evaluate the first argument. With further arguments it must be a
    /// String template whose `{}` placeholders they fill.
    pub(super) fn render_template(&self, args: &[String], env: &Environment) -> EvalResult {
        let Some((first, rest)) = args.split_first() else {
            return Err(syntax_error("expected at least one argument"));
        };
        let first = self.evaluate(first, env)?;
        if rest.is_empty() {
            return Ok(first);
        }
        let Value::String(template) = first else {
            return Err(type_mismatch("String template", first.type_name()));
        };
        let values = rest
            .iter()
            .map(|arg| self.evaluate(arg, env))
            .collect::<EvalResult<Vec<_>>>()?;
        Ok(Value::String(fill_placeholders(&template, &values)))
    }

    /// `console.write` / `console.writef`.
    fn write(&self, args: &[String], newline: bool, env: &Environment) -> EvalResult<()> {
        let text = self.render_template(args, env)?.to_string();
        if newline {
            self.print.println(&text);
        } else {
            self.print.print(&text);
        }
        Ok(())
    }
}

fn apply_step(value: &Value, step: Step) -> EvalResult {
    let delta: i8 = match step {
        Step::Increment => 1,
        Step::Decrement => -1,
    };
    match *value {
        Value::Integer(n) => n
            .checked_add(i64::from(delta))
            .map(Value::Integer)
            .ok_or_else(|| type_mismatch("Int64", format!("overflow stepping {n}"))),
        Value::Float32(f) => Ok(Value::Float32(f + f32::from(delta))),
        Value::Float64(f) => Ok(Value::Float64(f + f64::from(delta))),
        ref other => Err(type_mismatch("a number", other.type_name())),
    }
}
