//! Driver errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use ms_source::SourceError;

/// Anything that stops a program from starting.
///
/// Errors raised while the program runs are reported statement by statement
/// and counted in the run summary instead.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "`{}` is not a MicroScript file (expected .microscript, .mus or .micros)",
        path.display()
    )]
    InvalidExtension { path: PathBuf },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("invalid value for `{option}`: {message}")]
    InvalidOption { option: String, message: String },

    #[error("missing file path")]
    MissingPath,
}
