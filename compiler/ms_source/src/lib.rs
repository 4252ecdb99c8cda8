//! MS Source - turns MicroScript source text into runnable items.
//!
//! Two passes run before anything is evaluated:
//!
//! 1. [`preprocess`]: `#define` / `#undef` directives and macro expansion
//! 2. [`scan`]: comment stripping and carving the lines into functions,
//!    skipped control-flow blocks, imports and top-level statements
//!
//! Neither pass evaluates anything; the result is handed to `ms_eval`.

mod error;
pub mod preprocess;
pub mod scan;

pub use error::SourceError;
pub use preprocess::{preprocess, Preprocessor};
pub use scan::{scan, Item, ItemKind, Program};

/// Preprocess and scan `source` in one step.
pub fn parse_program(source: &str) -> Result<Program, SourceError> {
    let lines = preprocess(source)?;
    scan(&lines)
}
