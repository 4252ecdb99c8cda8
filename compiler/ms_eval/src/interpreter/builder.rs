//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::cell::{Cell, RefCell};

use super::Interpreter;
use crate::config::{AssignmentMode, InterpreterConfig};
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for creating Interpreter instances.
///
/// Defaults: shadowing assignment, a call depth limit of
/// [`DEFAULT_MAX_CALL_DEPTH`](crate::config::DEFAULT_MAX_CALL_DEPTH), and
/// output on stdout.
#[derive(Default)]
pub struct InterpreterBuilder {
    config: InterpreterConfig,
    print_handler: Option<SharedPrintHandler>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: InterpreterConfig) -> Self {
        self.config = config;
        self
    }

    /// Set how `name = expr;` treats bindings owned by enclosing scopes.
    #[must_use]
    pub fn assignment(mut self, mode: AssignmentMode) -> Self {
        self.config.assignment = mode;
        self
    }

    /// Set the maximum number of nested calls.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.config.max_call_depth = depth;
        self
    }

    /// Set the print handler for `console.write` and error reports.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            config: self.config,
            print: self.print_handler.unwrap_or_else(stdout_handler),
            call_depth: Cell::new(0),
            reported: RefCell::new(Vec::new()),
        }
    }
}
