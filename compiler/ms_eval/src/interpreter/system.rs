//! `console.system`: run an external command and stream its output.

use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};

use super::Interpreter;
use crate::environment::Environment;
use crate::errors::{syntax_error, system_command, type_mismatch, EvalResult};

impl Interpreter {
    /// Render the command (a String, or a template filled from the remaining
    /// arguments), split it on whitespace, run the first word with the rest
    /// as arguments and forward each stdout line to the print handler.
    /// Blocks until the command exits.
    pub(super) fn system(&self, args: &[String], env: &Environment) -> EvalResult<()> {
        let value = self.render_template(args, env)?;
        let Some(command) = value.as_str() else {
            return Err(type_mismatch("String", value.type_name()));
        };
        let mut words = command.split_whitespace();
        let Some(program) = words.next() else {
            return Err(syntax_error("console.system() requires a non-empty command"));
        };

        tracing::debug!(%command, "spawning");
        let mut child = Command::new(program)
            .args(words)
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| system_command(command, e))?;

        let streamed = match child.stdout.take() {
            Some(stdout) => BufReader::new(stdout)
                .lines()
                .try_for_each(|line| line.map(|line| self.print.println(&line))),
            None => Ok(()),
        };
        // Reap the child even when reading its output failed.
        let status = child.wait().map_err(|e| system_command(command, e))?;
        streamed.map_err(|e| system_command(command, e))?;

        if !status.success() {
            tracing::warn!(%command, %status, "command exited unsuccessfully");
        }
        Ok(())
    }
}
