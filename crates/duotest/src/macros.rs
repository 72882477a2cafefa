//! Entry macros - name tests from their source text and run them
//!
//! ```
//! use duotest::{check, check_eq, TestResult};
//!
//! fn adds() -> TestResult {
//!     check_eq!(1 + 1, 2)
//! }
//!
//! fn compares() -> TestResult {
//!     check!(2 > 1)
//! }
//!
//! let summary = duotest::test_all!(adds, compares);
//! assert_eq!(summary.fail_count, 0);
//! ```

/// Run tests against a fresh [`RuntimeSuite`](crate::RuntimeSuite) that
/// reports when the call ends. Yields the [`RunSummary`](crate::RunSummary).
#[macro_export]
macro_rules! test_all {
    ($($test:expr),+ $(,)?) => {{
        let suite = $crate::RuntimeSuite::new();
        let summary = $crate::test_all_in!(&suite, $($test),+);
        summary
    }};
}

/// Run tests against a borrowed suite.
///
/// Each entry is named by its own source text, so closures and turbofish
/// paths are fine:
///
/// ```
/// use duotest::{check_eq, NullSuite};
///
/// let summary = duotest::test_all_in!(&NullSuite, || check_eq!(1, 1), || check_eq!(2, 2));
/// assert_eq!(summary.ran, 2);
/// ```
#[macro_export]
macro_rules! test_all_in {
    ($suite:expr, $($test:expr),+ $(,)?) => {
        $crate::Runner::new($suite).run_all(::std::vec![$(
            $crate::TestCase::new($crate::names::display_name(stringify!($test)), $test)
        ),+])
    };
}

/// Run fixture methods, each against a fresh `Default` fixture, in a fresh
/// [`RuntimeSuite`](crate::RuntimeSuite).
///
/// ```
/// use duotest::{check_eq, TestResult};
///
/// #[derive(Default)]
/// struct Counter {
///     hits: u32,
/// }
///
/// impl Counter {
///     fn bump(&mut self) -> TestResult {
///         self.hits += 1;
///         check_eq!(self.hits, 1)
///     }
/// }
///
/// let summary = duotest::test_fixture!(Counter; Counter::bump, Counter::bump);
/// assert_eq!(summary.fail_count, 0);
/// ```
#[macro_export]
macro_rules! test_fixture {
    ($fixture:ty; $($test:expr),+ $(,)?) => {{
        let suite = $crate::RuntimeSuite::new();
        let summary = $crate::test_fixture_in!(&suite, $fixture; $($test),+);
        summary
    }};
}

/// Run fixture methods against a borrowed suite.
#[macro_export]
macro_rules! test_fixture_in {
    ($suite:expr, $fixture:ty; $($test:expr),+ $(,)?) => {
        $crate::Runner::new($suite).run_all_with_fixture(
            <$fixture as ::std::default::Default>::default,
            ::std::vec![$(
                $crate::FixtureCase::<$fixture>::new(
                    $crate::names::display_name(stringify!($test)),
                    $test,
                )
            ),+],
        )
    };
}

/// Force `const fn` tests through constant evaluation, then replay them
/// against [`NullSuite`](crate::NullSuite) for the console lines.
///
/// A failing test is a compile error, so the replay always passes.
#[macro_export]
macro_rules! test_all_const {
    ($($test:path),+ $(,)?) => {{
        $(
            const _: () = $crate::konst::require($test());
        )+
        let summary = $crate::test_all_in!(&$crate::NullSuite, $($test),+);
        summary
    }};
}

/// [`test_all_const!`] for fixture methods. The fixture is built from a
/// const expression, fresh for every method.
#[macro_export]
macro_rules! test_fixture_const {
    ($fixture:ty = $init:expr; $($test:path),+ $(,)?) => {{
        $(
            const _: () = {
                let mut fixture: $fixture = $init;
                $crate::konst::require($test(&mut fixture));
                ::std::mem::forget(fixture);
            };
        )+
        let summary = $crate::Runner::new(&$crate::NullSuite).run_all_with_fixture(
            || -> $fixture { $init },
            ::std::vec![$(
                $crate::FixtureCase::<$fixture>::new(
                    $crate::names::display_name(stringify!($test)),
                    $test,
                )
            ),+],
        );
        summary
    }};
}
