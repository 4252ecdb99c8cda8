//! Program driver: source text in, executed program out.

use std::path::Path;

use ms_eval::{
    stdout_handler, AssignmentMode, Environment, Interpreter, InterpreterConfig,
    SharedPrintHandler,
};
use ms_source::{parse_program, ItemKind};

use crate::CliError;

/// File extensions accepted by [`run_file`] and the bare-path shorthand.
pub const VALID_EXTENSIONS: [&str; 3] = ["microscript", "mus", "micros"];

/// Whether `path` ends in one of [`VALID_EXTENSIONS`].
pub fn has_valid_extension(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| VALID_EXTENSIONS.contains(&ext))
}

/// Settings for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub interpreter: InterpreterConfig,
}

impl RunOptions {
    /// Parse run arguments: `--assign=shadow|enclosing`, `--max-depth=N`
    /// and at most one file path. Returns the options and the path, if any.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<(Self, Option<String>), CliError> {
        let mut options = RunOptions::default();
        let mut path = None;
        for arg in args {
            let arg = arg.as_ref();
            if let Some(mode) = arg.strip_prefix("--assign=") {
                options.interpreter.assignment =
                    mode.parse::<AssignmentMode>().map_err(|e| CliError::InvalidOption {
                        option: "--assign".to_string(),
                        message: e.to_string(),
                    })?;
            } else if let Some(depth) = arg.strip_prefix("--max-depth=") {
                options.interpreter.max_call_depth = depth
                    .parse::<usize>()
                    .ok()
                    .filter(|&d| d > 0)
                    .ok_or_else(|| CliError::InvalidOption {
                        option: "--max-depth".to_string(),
                        message: format!("expected a positive integer, got `{depth}`"),
                    })?;
            } else if arg.starts_with('-') {
                return Err(CliError::UnknownOption(arg.to_string()));
            } else if path.is_none() {
                path = Some(arg.to_string());
            } else {
                return Err(CliError::UnknownOption(arg.to_string()));
            }
        }
        Ok((options, path))
    }
}

/// What happened during a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub statements: usize,
    pub functions: usize,
    /// Control-flow blocks that were recognized and not executed.
    pub skipped_blocks: usize,
    /// Statement errors that were reported.
    pub errors: usize,
    /// Whether `main()` was called after the top level.
    pub ran_main: bool,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }
}

/// Preprocess, scan and run `source` in a fresh root environment.
///
/// Items run in source order: a function is callable from the point it is
/// declared. A C-style `main` is called once the top level has finished.
#[tracing::instrument(level = "debug", skip_all)]
pub fn run_source(
    source: &str,
    options: &RunOptions,
    handler: SharedPrintHandler,
) -> Result<RunSummary, CliError> {
    let program = parse_program(source)?;
    let interpreter = Interpreter::builder()
        .config(options.interpreter.clone())
        .print_handler(handler)
        .build();
    let env = Environment::new();
    let mut summary = RunSummary::default();

    for item in &program.items {
        let _span = tracing::debug_span!("item", line = item.line).entered();
        match &item.kind {
            ItemKind::Function(function) => {
                env.define_function(function.clone());
                summary.functions += 1;
            }
            ItemKind::Statement(text) => {
                interpreter.execute(text, &env);
                summary.statements += 1;
            }
            ItemKind::Skipped { keyword, lines } => {
                tracing::debug!(%keyword, lines, "control-flow block not executed");
                summary.skipped_blocks += 1;
            }
            ItemKind::Import(module) => {
                tracing::debug!(%module, "ignoring import");
            }
        }
    }

    if program.auto_main {
        interpreter.execute("main();", &env);
        summary.ran_main = true;
    }

    summary.errors = interpreter.error_count();
    Ok(summary)
}

/// Run a file on stdout.
pub fn run_file(path: impl AsRef<Path>, options: &RunOptions) -> Result<RunSummary, CliError> {
    let path = path.as_ref();
    if !has_valid_extension(path) {
        return Err(CliError::InvalidExtension {
            path: path.to_path_buf(),
        });
    }
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "running");
    run_source(&source, options, stdout_handler())
}
