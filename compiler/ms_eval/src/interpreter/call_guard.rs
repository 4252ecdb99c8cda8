//! RAII guard for the interpreter's call depth.
//!
//! Entering a call bumps the depth; dropping the guard (on return, on error
//! or during unwinding) restores it.

use super::Interpreter;
use crate::errors::{recursion_limit, EvalResult};

pub(super) struct CallGuard<'interp> {
    interpreter: &'interp Interpreter,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        let depth = self.interpreter.call_depth.get();
        self.interpreter.call_depth.set(depth.saturating_sub(1));
    }
}

impl Interpreter {
    /// Enter one more call level, failing with `RecursionLimit` once the
    /// configured maximum is reached.
    pub(super) fn enter_call(&self) -> EvalResult<CallGuard<'_>> {
        let depth = self.call_depth.get();
        let limit = self.config.max_call_depth;
        if depth >= limit {
            return Err(recursion_limit(limit));
        }
        self.call_depth.set(depth + 1);
        Ok(CallGuard { interpreter: self })
    }
}
