//! Errors raised while preparing source text.

use thiserror::Error;

/// A problem in the layout of a source file. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("line {line}: malformed directive `{text}`")]
    MalformedDirective { line: usize, text: String },

    #[error("line {line}: `{{` is never closed")]
    UnclosedBrace { line: usize },

    #[error("line {line}: invalid function declaration `{header}`")]
    MalformedHeader { line: usize, header: String },

    #[error("line {line}: invalid parameter `{param}` (expected `name: Type`)")]
    MalformedParameter { line: usize, param: String },

    #[error("line {line}: {source}")]
    Type {
        line: usize,
        #[source]
        source: ms_eval::EvalError,
    },
}

impl SourceError {
    /// 1-based line the error points at.
    pub fn line(&self) -> usize {
        match self {
            SourceError::MalformedDirective { line, .. }
            | SourceError::UnclosedBrace { line }
            | SourceError::MalformedHeader { line, .. }
            | SourceError::MalformedParameter { line, .. }
            | SourceError::Type { line, .. } => *line,
        }
    }
}
