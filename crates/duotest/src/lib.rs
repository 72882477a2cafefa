//! duotest - dual-mode test harness
//!
//! The same test bodies and checks run either as ordinary runtime code,
//! reported on the console, or forced through constant evaluation, where a
//! failed check breaks the build.
//!
//! This library provides:
//! - Checks that yield a [`TestResult`] (`check!`, `check_eq!`,
//!   `check_nothrow!`, `check_throws!`, ...)
//! - An inline verify DSL (`v`, `vn`, `Verify & actual`)
//! - Suites aggregating pass/fail counts ([`RuntimeSuite`], [`NullSuite`])
//! - A sequential runner, plain or fixture-bound ([`Runner`])
//! - Compile-time gating for `const fn` tests ([`konst`])
//!
//! # Example
//!
//! ```
//! use duotest::{check, check_eq, check_nothrow, TestResult};
//!
//! fn parse(text: &str) -> Result<u32, std::num::ParseIntError> {
//!     text.parse()
//! }
//!
//! fn adds() -> TestResult {
//!     check_eq!(1 + 1, 2)
//! }
//!
//! fn parses() -> TestResult {
//!     let n = check_nothrow!(parse, "41")?;
//!     check!(n + 1 == 42)
//! }
//!
//! let summary = duotest::test_all!(adds, parses);
//! assert!(summary.is_success());
//! ```

/// duotest version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod assert;
pub mod console;
pub mod failure;
pub mod konst;
pub mod location;
mod macros;
pub mod names;
pub mod render;
pub mod runner;
pub mod suite;
pub mod verify;

// Re-export commonly used types
pub use assert::{AnyError, AnyPanic, AnyRaised, Expected, Outcome, Raised, Returned};
pub use console::{Capture, Console};
pub use failure::{TestFailure, TestResult};
pub use location::SourceLocation;
pub use runner::{FixtureCase, FixtureTest, RunSummary, Runner, TestCase};
pub use suite::{NullSuite, RuntimeSuite, Suite, Tally};
pub use verify::{v, vn, Expect, Verify};

pub use duotest_config::HarnessConfig;
