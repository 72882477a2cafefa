//! Console output - the stable report lines
//!
//! ```text
//! Running <name>...
//! <file>:<line>:<column> in <function>(): <message>
//! PASSED: <name> | FAILED: <name>
//!
//! FAILED: <name>
//! SUMMARY: Ran <total> tests. <failed> failed.
//! ```

use crate::failure::TestFailure;
use colored::*;
use duotest_config::HarnessConfig;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

/// Where console lines go.
#[derive(Debug, Clone)]
enum Sink {
    Stdout,
    Capture(Arc<Mutex<Vec<u8>>>),
}

/// Writer for per-test lines and suite summaries.
#[derive(Debug, Clone)]
pub struct Console {
    sink: Sink,
    /// Colour PASSED/FAILED markers
    color: bool,
    /// Print `Running <name>...` lines
    progress: bool,
}

static DEFAULT_CONSOLE: OnceLock<Console> = OnceLock::new();

/// Set once the first failed write has been logged.
static WRITE_FAILURE_LOGGED: AtomicBool = AtomicBool::new(false);

/// Handle to the lines written by a capturing [`Console`].
#[derive(Debug, Clone)]
pub struct Capture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Console {
    /// The installed default console, or stdout with default settings
    pub fn stdout() -> Self {
        match DEFAULT_CONSOLE.get() {
            Some(console) => console.clone(),
            None => Self::from_config(&HarnessConfig::default()),
        }
    }

    /// Make this the console returned by [`Console::stdout`] for the rest of
    /// the process. Only the first install takes effect; returns whether
    /// this one did.
    pub fn install(self) -> bool {
        let installed = DEFAULT_CONSOLE.set(self).is_ok();
        if !installed {
            log::warn!("default console already installed");
        }
        installed
    }

    /// Console on stdout configured from a harness config
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            sink: Sink::Stdout,
            color: config.color().enabled(),
            progress: config.progress(),
        }
    }

    /// Console writing into memory, without colour
    pub fn capture() -> (Self, Capture) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let console = Self {
            sink: Sink::Capture(Arc::clone(&buffer)),
            color: false,
            progress: true,
        };
        (console, Capture { buffer })
    }

    /// Enable or disable coloured markers
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Enable or disable `Running <name>...` lines
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// `Running <name>...`
    pub fn running(&self, name: &str) {
        if self.progress {
            self.write_line(&format!("Running {}...", name));
        }
    }

    /// Location-tagged diagnostic for a failed check
    pub fn diagnostic(&self, failure: &TestFailure) {
        self.write_line(&failure.to_string());
    }

    /// `PASSED: <name>` or `FAILED: <name>`
    pub fn outcome(&self, name: &str, passed: bool) {
        self.write_line(&format!("{}: {}", self.marker(passed), name));
    }

    /// Blank line, one `FAILED: <name>` per failure, then the summary line
    pub fn summary(&self, total: usize, failed: usize, failed_names: &[String]) {
        let mut lines = Vec::with_capacity(failed_names.len() + 2);
        lines.push(String::new());
        for name in failed_names {
            lines.push(format!("{}: {}", self.marker(false), name));
        }
        lines.push(format!("SUMMARY: Ran {} tests. {} failed.", total, failed));
        self.write_lines(&lines);
    }

    fn marker(&self, passed: bool) -> String {
        match (passed, self.color) {
            (true, true) => "PASSED".green().to_string(),
            (false, true) => "FAILED".red().to_string(),
            (true, false) => "PASSED".to_string(),
            (false, false) => "FAILED".to_string(),
        }
    }

    fn write_line(&self, line: &str) {
        self.write_lines(&[line.to_string()]);
    }

    // Lines written together are not interleaved with other writers.
    fn write_lines(&self, lines: &[String]) {
        let written = match &self.sink {
            Sink::Stdout => write_all_lines(io::stdout().lock(), lines),
            Sink::Capture(buffer) => {
                let mut buffer = buffer.lock().unwrap_or_else(PoisonError::into_inner);
                write_all_lines(&mut *buffer, lines)
            }
        };
        if let Err(error) = written {
            note_write_failure(&WRITE_FAILURE_LOGGED, &error);
        }
    }
}

fn write_all_lines<W: Write>(mut out: W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

/// Warn about the first failed write only. Returns whether it warned.
fn note_write_failure(logged: &AtomicBool, error: &io::Error) -> bool {
    if logged.swap(true, Ordering::Relaxed) {
        return false;
    }
    log::warn!("failed to write test output: {}", error);
    true
}

impl Capture {
    /// Everything written so far
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Everything written so far, split into lines
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Drop everything written so far
    pub fn clear(&self) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::SourceLocation;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_per_test_lines() {
        let (console, capture) = Console::capture();
        console.running("adds");
        console.outcome("adds", true);
        console.running("breaks");
        console.diagnostic(&TestFailure::new(
            SourceLocation::new("demo.rs", 4, 2, "breaks"),
            "Value is false",
        ));
        console.outcome("breaks", false);

        assert_eq!(
            capture.lines(),
            vec![
                "Running adds...",
                "PASSED: adds",
                "Running breaks...",
                "demo.rs:4:2 in breaks(): Value is false",
                "FAILED: breaks",
            ]
        );
    }

    #[test]
    fn test_progress_off_hides_running_only() {
        let (console, capture) = Console::capture();
        let console = console.with_progress(false);
        console.running("quiet");
        console.outcome("quiet", true);

        assert_eq!(capture.contents(), "PASSED: quiet\n");
    }

    #[test]
    fn test_summary_lines() {
        let (console, capture) = Console::capture();
        console.summary(3, 2, &["bad1".to_string(), "bad2".to_string()]);

        assert_eq!(
            capture.contents(),
            "\nFAILED: bad1\nFAILED: bad2\nSUMMARY: Ran 3 tests. 2 failed.\n"
        );
    }

    #[test]
    fn test_summary_with_no_failures() {
        let (console, capture) = Console::capture();
        console.summary(0, 0, &[]);

        assert_eq!(capture.contents(), "\nSUMMARY: Ran 0 tests. 0 failed.\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_error_is_returned() {
        let error = write_all_lines(BrokenPipe, &["PASSED: x".to_string()]).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
        assert!(write_all_lines(Vec::new(), &["PASSED: x".to_string()]).is_ok());
    }

    #[test]
    fn test_write_failure_warned_once() {
        let logged = AtomicBool::new(false);
        let error = io::Error::from(io::ErrorKind::BrokenPipe);
        assert!(note_write_failure(&logged, &error));
        assert!(!note_write_failure(&logged, &error));
        assert!(logged.load(Ordering::Relaxed));
    }

    #[test]
    fn test_capture_clear() {
        let (console, capture) = Console::capture();
        console.outcome("x", true);
        capture.clear();
        assert!(capture.contents().is_empty());
    }
}
