//! Interpreter configuration.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Where a plain assignment `x = expr;` writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AssignmentMode {
    /// Always bind in the current scope, shadowing any enclosing binding.
    #[default]
    Shadow,
    /// Overwrite the nearest enclosing binding; bind locally if none exists.
    Enclosing,
}

impl AssignmentMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentMode::Shadow => "shadow",
            AssignmentMode::Enclosing => "enclosing",
        }
    }
}

impl fmt::Display for AssignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown assignment mode `{0}` (expected `shadow` or `enclosing`)")]
pub struct ParseAssignmentModeError(String);

impl FromStr for AssignmentMode {
    type Err = ParseAssignmentModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shadow" => Ok(AssignmentMode::Shadow),
            "enclosing" => Ok(AssignmentMode::Enclosing),
            other => Err(ParseAssignmentModeError(other.to_string())),
        }
    }
}

/// Default bound on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

/// Settings that change evaluation semantics or limits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterpreterConfig {
    pub assignment: AssignmentMode,
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            assignment: AssignmentMode::default(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_mode_round_trips_through_text() {
        for mode in [AssignmentMode::Shadow, AssignmentMode::Enclosing] {
            assert_eq!(mode.as_str().parse::<AssignmentMode>(), Ok(mode));
        }
        assert!("global".parse::<AssignmentMode>().is_err());
    }

    #[test]
    fn defaults_preserve_shadowing() {
        let config = InterpreterConfig::default();
        assert_eq!(config.assignment, AssignmentMode::Shadow);
        assert_eq!(config.max_call_depth, DEFAULT_MAX_CALL_DEPTH);
    }
}
