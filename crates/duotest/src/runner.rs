//! Test runner - invoke test bodies and classify them against a suite
//!
//! Tests run strictly in the order supplied, one after another. A body
//! returning `Err(TestFailure)` is a failed test; a panic escaping a body is
//! a harness defect and is not caught.

use crate::console::Console;
use crate::failure::TestResult;
use crate::names;
use crate::suite::Suite;
use std::borrow::Cow;
use std::fmt;

/// Aggregate of one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Tests run in this batch
    pub ran: usize,
    /// Tests that failed in this batch
    pub fail_count: usize,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.ran - self.fail_count
    }

    /// Check if every test in the batch passed
    pub fn is_success(&self) -> bool {
        self.fail_count == 0
    }

    /// Fold another batch into this one
    pub fn merge(self, other: RunSummary) -> RunSummary {
        RunSummary {
            ran: self.ran + other.ran,
            fail_count: self.fail_count + other.fail_count,
        }
    }

    fn record(&mut self, passed: bool) {
        self.ran += 1;
        if !passed {
            self.fail_count += 1;
        }
    }
}

/// A named zero-argument test body
pub struct TestCase<'a> {
    pub name: Cow<'a, str>,
    body: Box<dyn FnOnce() -> TestResult + 'a>,
}

impl<'a> TestCase<'a> {
    pub fn new<B>(name: impl Into<Cow<'a, str>>, body: B) -> Self
    where
        B: FnOnce() -> TestResult + 'a,
    {
        Self {
            name: name.into(),
            body: Box::new(body),
        }
    }
}

impl fmt::Debug for TestCase<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish()
    }
}

/// Marker for fixture methods taking `&F`
pub enum ByRef {}

/// Marker for fixture methods taking `&mut F`
pub enum ByMut {}

/// A test body bound to a fixture: `fn(&F) -> TestResult` or
/// `fn(&mut F) -> TestResult`.
pub trait FixtureTest<F, Marker> {
    fn call(self, fixture: &mut F) -> TestResult;
}

impl<F, T> FixtureTest<F, ByRef> for T
where
    T: FnOnce(&F) -> TestResult,
{
    fn call(self, fixture: &mut F) -> TestResult {
        self(fixture)
    }
}

impl<F, T> FixtureTest<F, ByMut> for T
where
    T: FnOnce(&mut F) -> TestResult,
{
    fn call(self, fixture: &mut F) -> TestResult {
        self(fixture)
    }
}

/// A named fixture method
pub struct FixtureCase<'a, F> {
    pub name: Cow<'a, str>,
    method: Box<dyn FnOnce(&mut F) -> TestResult + 'a>,
}

impl<'a, F> FixtureCase<'a, F> {
    pub fn new<M, T>(name: impl Into<Cow<'a, str>>, method: T) -> Self
    where
        T: FixtureTest<F, M> + 'a,
    {
        Self {
            name: name.into(),
            method: Box::new(move |fixture: &mut F| method.call(fixture)),
        }
    }
}

impl<F> fmt::Debug for FixtureCase<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixtureCase")
            .field("name", &self.name)
            .finish()
    }
}

/// Runs tests and records them in a borrowed suite
pub struct Runner<'s, S: Suite + ?Sized> {
    suite: &'s S,
    console: Console,
}

impl<'s, S: Suite + ?Sized> Runner<'s, S> {
    /// Runner writing through the suite's console
    pub fn new(suite: &'s S) -> Self {
        let console = suite.console();
        Self { suite, console }
    }

    /// Runner writing through `console`
    pub fn with_console(suite: &'s S, console: Console) -> Self {
        Self { suite, console }
    }

    /// The suite tests are recorded in
    pub fn suite(&self) -> &'s S {
        self.suite
    }

    /// Run one test. Returns whether it passed.
    pub fn run_single<B>(&self, name: &str, body: B) -> bool
    where
        B: FnOnce() -> TestResult,
    {
        self.console.running(name);
        let result = body();
        self.classify(name, result)
    }

    /// Run tests in order
    pub fn run_all<'a, I>(&self, cases: I) -> RunSummary
    where
        I: IntoIterator<Item = TestCase<'a>>,
    {
        let mut summary = RunSummary::default();
        for case in cases {
            summary.record(self.run_single(&case.name, case.body));
        }
        summary
    }

    /// Run one fixture method against a fixture built by `factory`.
    ///
    /// The fixture is dropped as soon as the method returns, before the
    /// outcome is printed.
    pub fn run_single_with_fixture<F, M, T>(
        &self,
        factory: impl FnOnce() -> F,
        name: &str,
        method: T,
    ) -> bool
    where
        T: FixtureTest<F, M>,
    {
        self.console.running(name);
        let result = {
            let mut fixture = factory();
            log::debug!("constructed fixture for {}", name);
            let result = method.call(&mut fixture);
            drop(fixture);
            log::debug!("dropped fixture after {}", name);
            result
        };
        self.classify(name, result)
    }

    /// Run fixture methods in order, each against a fresh fixture
    pub fn run_all_with_fixture<'a, F, I>(
        &self,
        factory: impl Fn() -> F,
        cases: I,
    ) -> RunSummary
    where
        I: IntoIterator<Item = FixtureCase<'a, F>>,
        F: 'a,
    {
        let mut summary = RunSummary::default();
        for case in cases {
            let passed = self.run_single_with_fixture(&factory, &case.name, case.method);
            summary.record(passed);
        }
        summary
    }

    /// Run `bodies` named by the comma-joined `names_text`, as written at
    /// the call site.
    ///
    /// # Panics
    ///
    /// When the number of names and bodies differ.
    pub fn run_listed<I>(&self, names_text: &str, bodies: I) -> RunSummary
    where
        I: IntoIterator,
        I::Item: FnOnce() -> TestResult,
    {
        let names = names::split_names(names_text);
        let bodies: Vec<I::Item> = bodies.into_iter().collect();
        if names.len() != bodies.len() {
            log::warn!(
                "{} test names for {} tests in '{}'",
                names.len(),
                bodies.len(),
                names_text
            );
        }
        crate::verify!(
            names.len() == bodies.len(),
            "test name list and test list differ in length"
        );

        let mut summary = RunSummary::default();
        for (name, body) in names.into_iter().zip(bodies) {
            summary.record(self.run_single(name, body));
        }
        summary
    }

    fn classify(&self, name: &str, result: TestResult) -> bool {
        let passed = match result {
            Ok(()) => true,
            Err(failure) => {
                self.console.diagnostic(&failure);
                false
            }
        };
        self.console.outcome(name, passed);
        self.suite.record(name, passed);
        log::trace!("{} {}", if passed { "passed" } else { "failed" }, name);
        passed
    }
}
