//! The MicroScript interpreter.
//!
//! An [`Interpreter`] holds what stays fixed for a run: the configuration,
//! the print handler, the current call depth and the list of reported
//! errors. Every operation takes the acting [`Environment`] explicitly, so
//! one interpreter can drive any number of independent scope chains.
//!
//! The work is split across submodules:
//!
//! - `evaluate`: expression dispatch (literals, calls, names, negation, ternary)
//! - `arith`: the precedence-climbing arithmetic parser
//! - `interpolate`: escapes, `{name}` interpolation and `{}` placeholders
//! - `execute`: statement execution and error reporting
//! - `invoke`: function calls and body execution
//! - `system`: `console.system` child processes
//! - `call_guard`: RAII call-depth accounting

mod arith;
mod builder;
mod call_guard;
mod evaluate;
mod execute;
mod interpolate;
mod invoke;
mod system;

use std::cell::{Cell, Ref, RefCell};

pub use builder::InterpreterBuilder;
pub use interpolate::{fill_placeholders, interpolate, unescape};

use crate::config::InterpreterConfig;
use crate::errors::EvalError;
use crate::print_handler::SharedPrintHandler;

/// A statement error that was caught and reported.
#[derive(Debug)]
pub struct ReportedError {
    /// The statement text as written.
    pub statement: String,
    pub error: EvalError,
}

impl ReportedError {
    /// Report text: `error[E6002]: ...` plus the failing statement.
    pub fn render(&self) -> String {
        format!(
            "error[{}]: {}\n  --> in statement: {}",
            self.error.code(),
            self.error,
            self.statement
        )
    }
}

/// Evaluates expressions, executes statements and invokes functions.
pub struct Interpreter {
    config: InterpreterConfig,
    print: SharedPrintHandler,
    /// Number of function calls currently in progress.
    call_depth: Cell<usize>,
    reported: RefCell<Vec<ReportedError>>,
}

impl Interpreter {
    /// Interpreter with the default configuration, printing to stdout.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    /// Current number of nested calls.
    pub fn call_depth(&self) -> usize {
        self.call_depth.get()
    }

    /// Errors reported so far, in order.
    pub fn reported_errors(&self) -> Ref<'_, [ReportedError]> {
        Ref::map(self.reported.borrow(), Vec::as_slice)
    }

    pub fn error_count(&self) -> usize {
        self.reported.borrow().len()
    }

    /// Record a failed statement and send it to the print handler.
    fn report(&self, statement: &str, error: EvalError) {
        tracing::debug!(code = %error.code(), %statement, "statement failed");
        let reported = ReportedError {
            statement: statement.trim().to_string(),
            error,
        };
        self.print.report(&reported.render());
        self.reported.borrow_mut().push(reported);
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
