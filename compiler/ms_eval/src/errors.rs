//! Evaluation errors and their constructors.
//!
//! All error construction goes through the helpers in this module so that
//! message wording lives in one place.
//!
//! # Codes
//!
//! Every error carries a stable code for reports:
//!
//! | code  | kind                    |
//! |-------|-------------------------|
//! | E6001 | syntax error            |
//! | E6002 | type mismatch           |
//! | E6003 | undefined variable      |
//! | E6004 | undefined function      |
//! | E6005 | argument count mismatch |
//! | E6006 | unknown type annotation |
//! | E6007 | recursion limit         |
//! | E6008 | system command failure  |

use std::fmt;

use thiserror::Error;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// An error raised while evaluating an expression or executing a statement.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("syntax error: {message}")]
    Syntax { message: String },

    #[error("type error: expected {expected}, got {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },

    #[error("undefined function: {name}")]
    UndefinedFunction { name: String },

    #[error("{name} expects {expected} {}, got {got}", arguments_noun(.expected))]
    ArgumentCountMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("unknown type annotation: {annotation}")]
    UnknownTypeAnnotation { annotation: String },

    #[error("recursion limit exceeded: more than {limit} nested calls")]
    RecursionLimit { limit: usize },

    #[error("failed to run `{command}`: {source}")]
    SystemCommand {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

fn arguments_noun(count: &usize) -> &'static str {
    if *count == 1 {
        "argument"
    } else {
        "arguments"
    }
}

impl EvalError {
    /// Stable short code used in reports.
    pub fn code(&self) -> ErrorCode {
        match self {
            EvalError::Syntax { .. } => ErrorCode::E6001,
            EvalError::TypeMismatch { .. } => ErrorCode::E6002,
            EvalError::UndefinedVariable { .. } => ErrorCode::E6003,
            EvalError::UndefinedFunction { .. } => ErrorCode::E6004,
            EvalError::ArgumentCountMismatch { .. } => ErrorCode::E6005,
            EvalError::UnknownTypeAnnotation { .. } => ErrorCode::E6006,
            EvalError::RecursionLimit { .. } => ErrorCode::E6007,
            EvalError::SystemCommand { .. } => ErrorCode::E6008,
        }
    }

    #[inline]
    pub fn is_syntax(&self) -> bool {
        matches!(self, EvalError::Syntax { .. })
    }
}

/// Error codes for evaluation diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Malformed statement or expression text
    E6001,
    /// Value tag does not match the expected type
    E6002,
    /// Name not bound in any enclosing scope
    E6003,
    /// No function with this name is visible
    E6004,
    /// Call with the wrong number of arguments
    E6005,
    /// Annotation is not a known type
    E6006,
    /// Too many nested calls
    E6007,
    /// `console.system` could not run the command
    E6008,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Syntax Errors

#[cold]
pub fn syntax_error(message: impl Into<String>) -> EvalError {
    EvalError::Syntax {
        message: message.into(),
    }
}

#[cold]
pub fn unexpected_char(ch: char, expr: &str) -> EvalError {
    syntax_error(format!("unexpected `{ch}` in `{expr}`"))
}

// Type Errors

#[cold]
pub fn type_mismatch(expected: impl fmt::Display, found: impl fmt::Display) -> EvalError {
    EvalError::TypeMismatch {
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

#[cold]
pub fn void_value(function: &str) -> EvalError {
    type_mismatch("a value", format!("void from {function}()"))
}

#[cold]
pub fn unknown_type_annotation(annotation: &str) -> EvalError {
    EvalError::UnknownTypeAnnotation {
        annotation: annotation.to_string(),
    }
}

// Variable and Function Errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::UndefinedVariable {
        name: name.to_string(),
    }
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::UndefinedFunction {
        name: name.to_string(),
    }
}

#[cold]
pub fn argument_count_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::ArgumentCountMismatch {
        name: name.to_string(),
        expected,
        got,
    }
}

#[cold]
pub fn recursion_limit(limit: usize) -> EvalError {
    EvalError::RecursionLimit { limit }
}

// Process Errors

#[cold]
pub fn system_command(command: &str, source: std::io::Error) -> EvalError {
    EvalError::SystemCommand {
        command: command.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages() {
        assert_eq!(
            type_mismatch("Int32", "String").to_string(),
            "type error: expected Int32, got String"
        );
        assert_eq!(
            undefined_variable("x").to_string(),
            "undefined variable: x"
        );
        assert_eq!(
            argument_count_mismatch("add", 2, 1).to_string(),
            "add expects 2 arguments, got 1"
        );
        assert_eq!(
            argument_count_mismatch("neg", 1, 0).to_string(),
            "neg expects 1 argument, got 0"
        );
    }

    #[test]
    fn codes_are_distinct_per_kind() {
        assert_eq!(syntax_error("x").code(), ErrorCode::E6001);
        assert_eq!(unknown_type_annotation("Int8").code().as_str(), "E6006");
        assert!(syntax_error("x").is_syntax());
        assert!(!undefined_function("f").is_syntax());
    }
}
