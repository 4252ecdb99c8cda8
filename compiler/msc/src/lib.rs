//! MSC - the MicroScript command-line runner.
//!
//! The binary is a thin argument matcher over this library:
//!
//! - [`run_source`] runs source text with any print handler (tests, hosts)
//! - [`run_file`] checks the extension, reads the file and runs it on stdout
//! - [`RunOptions`] holds the `--assign` / `--max-depth` settings
//! - [`init_tracing`] installs the log subscriber when logging is requested

mod driver;
mod error;
mod tracing_setup;
pub mod usage;

pub use driver::{
    has_valid_extension, run_file, run_source, RunOptions, RunSummary, VALID_EXTENSIONS,
};
pub use error::CliError;
pub use tracing_setup::init_tracing;
