//! Bundled demo tests
//!
//! `add`, `complex` and `Fixture::add` are `const fn` so they run in both
//! modes. The rest only make sense at runtime.

use duotest::{check, const_check_eq, v, vn, Expect, TestResult, Verify};
use std::thread;
use std::time::Duration;

/// How long `takes_a_sec` sleeps
pub const NAP: Duration = Duration::from_millis(200);

pub const fn add() -> TestResult {
    const_check_eq!(1 + 1, 2)
}

pub const fn complex() -> TestResult {
    const_check_eq!(1, 1)
}

pub fn takes_a_sec() -> TestResult {
    thread::sleep(NAP);
    Ok(())
}

/// Shared setup for fixture tests. Fresh for every test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    num: i32,
}

impl Fixture {
    pub const fn new() -> Self {
        Self { num: 1 }
    }

    pub const fn add(&self) -> TestResult {
        const_check_eq!(1 + self.num, 2)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

const fn increment(a: i32) -> i32 {
    a + 1
}

const fn what_is_it() -> &'static str {
    "good"
}

/// Every form of the verify DSL, each yielding the checked value.
pub fn using_verify() -> TestResult {
    let two = v(increment(1), 2)?;
    // inequality
    let two_ref = vn(Some(&two), None)?;

    let three = (increment(2) & 3.expected())?;
    let four = (4.expected() & increment(three))?;
    let two_point_five = (2.5_f64.expected() & 1.0_f64 + 1.5)?;
    let good = ("good".expected() & what_is_it())?;
    let three_ref = (Verify::new(None) ^ Some(&three))?;
    let twelve = (12_i32 ^ 11.expected())?;

    check!(two_ref == Some(&2) && three_ref == Some(&3))?;
    check!(four == 4 && two_point_five == 2.5 && good == "good" && twelve == 12)
}
