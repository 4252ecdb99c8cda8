//! MS Eval - evaluation and execution engine for MicroScript.
//!
//! This crate is the interpreter core. It works directly on statement and
//! expression text; there is no separate syntax tree or compilation step.
//!
//! # Architecture
//!
//! - [`Value`]: the closed set of runtime values
//! - [`Environment`]: chained scopes holding variables and functions
//! - [`Statement`]: ordered shape matchers classifying a statement line
//! - [`Interpreter`]: evaluates expressions, executes statements and
//!   invokes functions against an explicitly passed environment
//! - [`PrintHandlerImpl`]: where program output and error reports go
//!
//! ```text
//! let interpreter = Interpreter::builder().print_handler(buffer_handler()).build();
//! let env = Environment::new();
//! interpreter.execute("var x: Int32 = 2 + 3 * 4;", &env);
//! interpreter.execute("console.write(x);", &env); // 14
//! ```

pub mod config;
mod environment;
pub mod errors;
pub mod interpreter;
mod print_handler;
mod stack;
pub mod statement;
pub mod text;
mod typecheck;
mod value;

pub use config::{AssignmentMode, InterpreterConfig, DEFAULT_MAX_CALL_DEPTH};
pub use environment::{Environment, LocalScope};
pub use errors::{ErrorCode, EvalError, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, ReportedError};
pub use print_handler::{
    buffer_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl, SharedPrintHandler,
    StdoutPrintHandler,
};
pub use stack::ensure_sufficient_stack;
pub use statement::{Statement, Step};
pub use typecheck::check_type;
pub use value::{Closure, ClosureBody, Function, Parameter, ReturnType, TypeTag, Value};
