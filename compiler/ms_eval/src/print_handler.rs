//! Destinations for program output and error reports.
//!
//! `console.write` output goes through `println`/`print`; reports of failed
//! statements go through `report`. The stdout handler sends reports to
//! stderr, the buffer handler captures both streams separately for tests
//! and embedding hosts.

use std::io::Write;

use parking_lot::Mutex;

/// Writes program output to stdout and reports to stderr.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn println(&self, msg: &str) {
        println!("{msg}");
    }

    /// Print without newline, flushing so partial lines show up before a
    /// child process writes to the same terminal. A failed flush is logged
    /// and otherwise ignored.
    pub fn print(&self, msg: &str) {
        print!("{msg}");
        if let Err(error) = std::io::stdout().flush() {
            tracing::debug!(%error, "failed to flush stdout");
        }
    }

    pub fn report(&self, msg: &str) {
        eprintln!("{msg}");
    }
}

/// Captures output and reports in memory.
pub struct BufferPrintHandler {
    output: Mutex<String>,
    reports: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler {
            output: Mutex::new(String::new()),
            reports: Mutex::new(String::new()),
        }
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.output.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    pub fn print(&self, msg: &str) {
        self.output.lock().push_str(msg);
    }

    pub fn report(&self, msg: &str) {
        let mut buf = self.reports.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    pub fn get_output(&self) -> String {
        self.output.lock().clone()
    }

    pub fn get_reports(&self) -> String {
        self.reports.lock().clone()
    }

    pub fn clear(&self) {
        self.output.lock().clear();
        self.reports.lock().clear();
    }
}

impl Default for BufferPrintHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Print handler implementation using enum dispatch.
pub enum PrintHandlerImpl {
    /// Writes to stdout/stderr (default).
    Stdout(StdoutPrintHandler),
    /// Captures to buffers (tests, embedding).
    Buffer(BufferPrintHandler),
}

impl PrintHandlerImpl {
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
        }
    }

    pub fn print(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.print(msg),
            Self::Buffer(h) => h.print(msg),
        }
    }

    pub fn report(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.report(msg),
            Self::Buffer(h) => h.report(msg),
        }
    }

    /// Captured program output; empty for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) => String::new(),
        }
    }

    /// Captured reports; empty for handlers that don't capture.
    pub fn get_reports(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_reports(),
            Self::Stdout(_) => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Shared print handler that can be passed around.
pub type SharedPrintHandler = std::sync::Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}
