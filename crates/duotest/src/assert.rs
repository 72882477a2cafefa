//! Assertion engine
//!
//! Two layers:
//! - functions taking an explicit [`SourceLocation`] (`assert_true`,
//!   `assert_nothrow`, ...), usable from generic code;
//! - macros capturing the location at the call site (`check!`, `check_eq!`,
//!   `check_nothrow!`, ...), which also render operands for messages.
//!
//! Every check yields a [`TestResult`]; test bodies propagate it with `?`.
//!
//! # Raised errors
//!
//! A callee handed to `assert_nothrow` / `assert_throws` raises either by
//! returning `Err(e)` or by panicking. Both are captured as [`Raised`].
//! `assert_throws` is parameterised by an [`Expected`] kind:
//! - [`AnyRaised`] matches everything
//! - [`AnyError`] matches every returned error
//! - [`AnyPanic`] matches every panic
//! - a concrete `E: Error` matches a returned error or panic payload of type `E`

use crate::failure::{TestFailure, TestResult};
use crate::location::SourceLocation;
use std::any::Any;
use std::error::Error;
use std::panic::{self, AssertUnwindSafe};

// ============================================================================
// Basic assertions
// ============================================================================

/// Fails with `Value is false` unless `value` holds.
pub const fn assert_true(value: bool, location: SourceLocation) -> TestResult {
    if !value {
        return Err(TestFailure::new(location, "Value is false"));
    }
    Ok(())
}

/// Fails with `Value is true` if `value` holds.
pub const fn assert_false(value: bool, location: SourceLocation) -> TestResult {
    if value {
        return Err(TestFailure::new(location, "Value is true"));
    }
    Ok(())
}

/// Failure for two operands that should have compared equal.
pub fn not_equal(location: SourceLocation, lhs: &str, rhs: &str) -> TestFailure {
    TestFailure::formatted(
        location,
        format!("'{}' and '{}' are not equal", lhs, rhs),
    )
}

/// Failure for two operands that should have compared unequal.
pub fn unexpectedly_equal(location: SourceLocation, lhs: &str, rhs: &str) -> TestFailure {
    TestFailure::formatted(location, format!("'{}' and '{}' are equal", lhs, rhs))
}

/// Harness precondition. Panics with a location-tagged message; never goes
/// through suite bookkeeping.
pub fn verify(condition: bool, message: &str, location: SourceLocation) {
    if !condition {
        log::error!("harness precondition violated at {}", location);
        panic!("{}: {}", location, message);
    }
}

// ============================================================================
// Raised errors
// ============================================================================

/// What a callee raised instead of returning normally.
pub enum Raised {
    /// The callee returned `Err`
    Error(Box<dyn Error + Send + Sync + 'static>),
    /// The callee panicked
    Panic(Box<dyn Any + Send + 'static>),
}

impl Raised {
    /// Human-readable description, if the raised value carries one.
    pub fn description(&self) -> Option<String> {
        match self {
            Raised::Error(e) => Some(e.to_string()),
            Raised::Panic(payload) => {
                if let Some(s) = payload.downcast_ref::<&'static str>() {
                    Some((*s).to_string())
                } else {
                    payload.downcast_ref::<String>().cloned()
                }
            }
        }
    }
}

impl std::fmt::Debug for Raised {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Raised::Error(e) => f.debug_tuple("Error").field(e).finish(),
            Raised::Panic(_) => f
                .debug_tuple("Panic")
                .field(&self.description())
                .finish(),
        }
    }
}

/// Return types a checked callee may have.
pub trait Outcome {
    type Value;

    fn into_outcome(self) -> Result<Self::Value, Raised>;
}

impl<T, E> Outcome for Result<T, E>
where
    E: Into<Box<dyn Error + Send + Sync + 'static>>,
{
    type Value = T;

    fn into_outcome(self) -> Result<T, Raised> {
        self.map_err(|e| Raised::Error(e.into()))
    }
}

impl Outcome for () {
    type Value = ();

    fn into_outcome(self) -> Result<(), Raised> {
        Ok(())
    }
}

/// A plain return value that can only raise by panicking.
///
/// Common value types are outcomes already; wrap anything else:
/// `check_nothrow!(|| Returned(build()))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Returned<T>(pub T);

impl<T> Outcome for Returned<T> {
    type Value = T;

    fn into_outcome(self) -> Result<T, Raised> {
        Ok(self.0)
    }
}

macro_rules! plain_outcome {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Outcome for $ty {
                type Value = $ty;

                fn into_outcome(self) -> Result<$ty, Raised> {
                    Ok(self)
                }
            }
        )+
    };
}

plain_outcome!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String,
);

impl<'a> Outcome for &'a str {
    type Value = &'a str;

    fn into_outcome(self) -> Result<&'a str, Raised> {
        Ok(self)
    }
}

impl<T> Outcome for Option<T> {
    type Value = Option<T>;

    fn into_outcome(self) -> Result<Option<T>, Raised> {
        Ok(self)
    }
}

impl<T> Outcome for Vec<T> {
    type Value = Vec<T>;

    fn into_outcome(self) -> Result<Vec<T>, Raised> {
        Ok(self)
    }
}

/// Call `call`, turning a returned error or a panic into [`Raised`].
pub fn invoke<F, O>(call: F) -> Result<O::Value, Raised>
where
    F: FnOnce() -> O,
    O: Outcome,
{
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(outcome) => outcome.into_outcome(),
        Err(payload) => Err(Raised::Panic(payload)),
    }
}

/// Kinds of raised values `assert_throws` can expect.
pub trait Expected: 'static {
    fn matches(raised: &Raised) -> bool;
}

/// Matches anything raised.
pub struct AnyRaised;

/// Matches every returned error.
pub struct AnyError;

/// Matches every panic.
pub struct AnyPanic;

impl Expected for AnyRaised {
    fn matches(_: &Raised) -> bool {
        true
    }
}

impl Expected for AnyError {
    fn matches(raised: &Raised) -> bool {
        matches!(raised, Raised::Error(_))
    }
}

impl Expected for AnyPanic {
    fn matches(raised: &Raised) -> bool {
        matches!(raised, Raised::Panic(_))
    }
}

impl<E: Error + 'static> Expected for E {
    fn matches(raised: &Raised) -> bool {
        match raised {
            Raised::Error(e) => e.downcast_ref::<E>().is_some(),
            Raised::Panic(payload) => payload.downcast_ref::<E>().is_some(),
        }
    }
}

// ============================================================================
// Error assertions
// ============================================================================

/// Calls `call` and fails if it raises. Returns the callee's value otherwise.
///
/// `args` is the rendered argument list quoted in the failure message.
pub fn assert_nothrow<F, O>(call: F, args: &str, location: SourceLocation) -> TestResult<O::Value>
where
    F: FnOnce() -> O,
    O: Outcome,
{
    invoke(call).map_err(|raised| {
        let message = match raised.description() {
            Some(what) => format!(
                "Unexpected error thrown with arguments '{}'. what(): '{}'",
                args, what
            ),
            None => format!("Unexpected unknown error thrown with arguments '{}'", args),
        };
        TestFailure::formatted(location, message)
    })
}

/// Calls `call` and fails unless it raises something matching `K`.
pub fn assert_throws<K, F, O>(call: F, args: &str, location: SourceLocation) -> TestResult
where
    K: Expected,
    F: FnOnce() -> O,
    O: Outcome,
{
    let raised = match invoke(call) {
        Ok(_) => {
            return Err(TestFailure::formatted(
                location,
                format!(
                    "Invocation did not throw an exception with arguments '{}'",
                    args
                ),
            ))
        }
        Err(raised) => raised,
    };

    if K::matches(&raised) {
        return Ok(());
    }

    let message = match raised.description() {
        Some(what) => format!(
            "Invocation threw an error of unexpected type with arguments '{}'. what(): '{}'",
            args, what
        ),
        None => format!(
            "Invocation threw an error of unexpected and unknown type with arguments '{}'",
            args
        ),
    };
    Err(TestFailure::formatted(location, message))
}

// ============================================================================
// Macros
// ============================================================================

/// Check that a condition holds.
#[macro_export]
macro_rules! check {
    ($cond:expr $(,)?) => {
        $crate::assert::assert_true($cond, $crate::here!())
    };
}

/// Check that a condition does not hold.
#[macro_export]
macro_rules! check_false {
    ($cond:expr $(,)?) => {
        $crate::assert::assert_false($cond, $crate::here!())
    };
}

/// Check two values for equality, quoting both on failure.
#[macro_export]
macro_rules! check_eq {
    ($lhs:expr, $rhs:expr $(,)?) => {
        match (&$lhs, &$rhs) {
            (lhs, rhs) => {
                if *lhs == *rhs {
                    ::std::result::Result::Ok(())
                } else {
                    ::std::result::Result::Err($crate::assert::not_equal(
                        $crate::here!(),
                        &$crate::render!(lhs),
                        &$crate::render!(rhs),
                    ))
                }
            }
        }
    };
}

/// Check two values for inequality, quoting both on failure.
#[macro_export]
macro_rules! check_ne {
    ($lhs:expr, $rhs:expr $(,)?) => {
        match (&$lhs, &$rhs) {
            (lhs, rhs) => {
                if *lhs != *rhs {
                    ::std::result::Result::Ok(())
                } else {
                    ::std::result::Result::Err($crate::assert::unexpectedly_equal(
                        $crate::here!(),
                        &$crate::render!(lhs),
                        &$crate::render!(rhs),
                    ))
                }
            }
        }
    };
}

/// Call `callable(args...)` and check it raises nothing. Yields the
/// callee's value.
///
/// ```
/// use duotest::{check_nothrow, TestResult};
///
/// fn parse(text: &str) -> Result<i32, std::num::ParseIntError> {
///     text.parse()
/// }
///
/// fn body() -> TestResult {
///     let n = check_nothrow!(parse, "12")?;
///     duotest::check_eq!(n, 12)
/// }
/// assert!(body().is_ok());
/// ```
#[macro_export]
macro_rules! check_nothrow {
    ($callable:expr $(, $arg:expr)* $(,)?) => {
        $crate::__bind_args!(nothrow; $callable; []; $($arg,)*)
    };
}

/// Call `callable(args...)` and check it raises anything.
#[macro_export]
macro_rules! check_throws {
    ($callable:expr $(, $arg:expr)* $(,)?) => {
        $crate::__bind_args!((throws $crate::assert::AnyRaised); $callable; []; $($arg,)*)
    };
}

/// Call `callable(args...)` and check it raises something of kind `K`.
///
/// `K` is [`AnyRaised`], [`AnyError`], [`AnyPanic`] or a concrete error type.
#[macro_export]
macro_rules! check_throws_as {
    ($kind:ty, $callable:expr $(, $arg:expr)* $(,)?) => {
        $crate::__bind_args!((throws $kind); $callable; []; $($arg,)*)
    };
}

// Binds each argument once, then renders and passes them on.
#[doc(hidden)]
#[macro_export]
macro_rules! __bind_args {
    (nothrow; $callable:expr; [$($bound:ident)*];) => {{
        let args = $crate::render::join_args(&[$($crate::render!($bound)),*]);
        $crate::assert::assert_nothrow(move || ($callable)($($bound),*), &args, $crate::here!())
    }};
    ((throws $kind:ty); $callable:expr; [$($bound:ident)*];) => {{
        let args = $crate::render::join_args(&[$($crate::render!($bound)),*]);
        $crate::assert::assert_throws::<$kind, _, _>(
            move || ($callable)($($bound),*),
            &args,
            $crate::here!(),
        )
    }};
    ($mode:tt; $callable:expr; [$($bound:ident)*]; $head:expr, $($rest:expr,)*) => {{
        let arg = $head;
        $crate::__bind_args!($mode; $callable; [$($bound)* arg]; $($rest,)*)
    }};
}

/// Harness precondition check. Panics on violation.
#[macro_export]
macro_rules! verify {
    ($cond:expr, $message:expr $(,)?) => {
        $crate::assert::verify($cond, $message, $crate::here!())
    };
    ($cond:expr $(,)?) => {
        $crate::assert::verify($cond, stringify!($cond), $crate::here!())
    };
}

// ============================================================================
// Unit tests
// ============================================================================
