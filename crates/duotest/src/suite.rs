//! Suites - aggregate pass/fail bookkeeping for a group of tests
//!
//! The runner is written against the [`Suite`] trait and works with either
//! implementation:
//! - [`RuntimeSuite`]: real counters, emits a report once
//! - [`NullSuite`]: every operation inert, for runs whose only signal is
//!   go/no-go (tests already forced through constant evaluation)

use crate::console::Console;
use duotest_config::HarnessConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Capabilities the runner needs from a suite.
pub trait Suite: Sync {
    fn increment_total(&self);

    fn increment_failed(&self);

    fn add_failed_test(&self, name: &str);

    /// Failed count so far; 0 means passing
    fn status(&self) -> usize;

    fn report(&self);

    /// Console the runner writes per-test lines to.
    fn console(&self) -> Console {
        Console::stdout()
    }

    /// Record one classified test.
    fn record(&self, name: &str, passed: bool) {
        self.increment_total();
        if !passed {
            self.increment_failed();
            self.add_failed_test(name);
        }
    }
}

/// Counters behind the runtime suite's lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub failed: usize,
    /// In failure order
    pub failed_names: Vec<String>,
}

/// Stateful suite. Safe to share between threads; each mutation happens
/// under one lock.
#[derive(Debug)]
pub struct RuntimeSuite {
    tally: Mutex<Tally>,
    console: Console,
    report_on_drop: bool,
    reported: AtomicBool,
}

impl Default for RuntimeSuite {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeSuite {
    /// Suite reporting through [`Console::stdout`] when dropped
    pub fn new() -> Self {
        Self::with_console(Console::stdout())
    }

    /// Suite reporting through `console` when dropped
    pub fn with_console(console: Console) -> Self {
        Self {
            tally: Mutex::new(Tally::default()),
            console,
            report_on_drop: true,
            reported: AtomicBool::new(false),
        }
    }

    /// Suite configured from a harness config
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::with_console(Console::from_config(config))
            .with_report_on_drop(config.report_on_drop())
    }

    /// Whether dropping the suite emits the report
    pub fn with_report_on_drop(mut self, report_on_drop: bool) -> Self {
        self.report_on_drop = report_on_drop;
        self
    }

    /// Copy of the current counters
    pub fn snapshot(&self) -> Tally {
        self.lock().clone()
    }

    pub fn total(&self) -> usize {
        self.lock().total
    }

    pub fn failed(&self) -> usize {
        self.lock().failed
    }

    pub fn failed_names(&self) -> Vec<String> {
        self.lock().failed_names.clone()
    }

    /// Whether the report has been emitted
    pub fn is_reported(&self) -> bool {
        self.reported.load(Ordering::Acquire)
    }

    fn lock(&self) -> MutexGuard<'_, Tally> {
        self.tally.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Suite for RuntimeSuite {
    fn increment_total(&self) {
        self.lock().total += 1;
    }

    fn increment_failed(&self) {
        self.lock().failed += 1;
    }

    fn add_failed_test(&self, name: &str) {
        self.lock().failed_names.push(name.to_string());
    }

    fn status(&self) -> usize {
        self.lock().failed
    }

    /// Emits the report. Later calls, and the drop, do nothing.
    fn report(&self) {
        if self.reported.swap(true, Ordering::AcqRel) {
            return;
        }
        let tally = self.snapshot();
        log::debug!(
            "reporting suite: {} run, {} failed",
            tally.total,
            tally.failed
        );
        self.console
            .summary(tally.total, tally.failed, &tally.failed_names);
    }

    fn console(&self) -> Console {
        self.console.clone()
    }

    fn record(&self, name: &str, passed: bool) {
        let mut tally = self.lock();
        tally.total += 1;
        if !passed {
            tally.failed += 1;
            tally.failed_names.push(name.to_string());
        }
    }
}

impl Drop for RuntimeSuite {
    fn drop(&mut self) {
        if self.report_on_drop {
            self.report();
        }
    }
}

/// Suite whose operations do nothing. `status()` is always 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullSuite;

impl Suite for NullSuite {
    fn increment_total(&self) {}

    fn increment_failed(&self) {}

    fn add_failed_test(&self, _name: &str) {}

    fn status(&self) -> usize {
        0
    }

    fn report(&self) {}

    fn record(&self, _name: &str, _passed: bool) {}
}
