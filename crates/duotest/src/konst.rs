//! Compile-time gate
//!
//! A test written as a `const fn` returning [`TestResult`] can be forced
//! through constant evaluation:
//!
//! ```
//! use duotest::{const_check, const_check_eq, try_const, TestResult};
//!
//! const fn adds() -> TestResult {
//!     try_const!(const_check_eq!(1 + 1, 2));
//!     try_const!(const_check!(3 > 2));
//!     Ok(())
//! }
//!
//! const _: () = duotest::konst::require(adds());
//! ```
//!
//! A failing check turns the `const` item into a compile error carrying the
//! failure message:
//!
//! ```compile_fail
//! use duotest::{const_check_eq, TestResult};
//!
//! const fn broken() -> TestResult {
//!     const_check_eq!(1, 2)
//! }
//!
//! const _: () = duotest::konst::require(broken());
//! ```
//!
//! Only operations allowed in `const fn` are available here: `==` on
//! primitives, static messages, no formatting.

use crate::failure::TestResult;

/// Message used when a failure carries a formatted message.
pub const OPAQUE_FAILURE: &str = "test failed during constant evaluation";

/// Panic with the failure message if `result` is a failure. In a `const`
/// item the panic is a compile error.
pub const fn require(result: TestResult) {
    if let Err(failure) = &result {
        match failure.static_message() {
            Some(message) => panic!("{}", message),
            None => panic!("{}", OPAQUE_FAILURE),
        }
    }
    std::mem::forget(result);
}

/// `?` for `const fn`: return the failure, or continue.
///
/// Works on `TestResult<()>`. The result is moved as a whole in every arm,
/// which keeps the failure's destructor out of constant evaluation.
#[macro_export]
macro_rules! try_const {
    ($result:expr $(,)?) => {
        match $result {
            failure @ ::std::result::Result::Err(_) => return failure,
            passed => ::std::mem::forget(passed),
        }
    };
}

/// `check!` usable in `const fn`.
#[macro_export]
macro_rules! const_check {
    ($cond:expr $(,)?) => {
        $crate::assert::assert_true($cond, $crate::here_const!())
    };
}

/// `check_false!` usable in `const fn`.
#[macro_export]
macro_rules! const_check_false {
    ($cond:expr $(,)?) => {
        $crate::assert::assert_false($cond, $crate::here_const!())
    };
}

/// `check_eq!` usable in `const fn`. Operands are quoted as written, since
/// values cannot be formatted during constant evaluation.
#[macro_export]
macro_rules! const_check_eq {
    ($lhs:expr, $rhs:expr $(,)?) => {
        if $lhs == $rhs {
            ::std::result::Result::<(), $crate::TestFailure>::Ok(())
        } else {
            ::std::result::Result::<(), $crate::TestFailure>::Err($crate::TestFailure::new(
                $crate::here_const!(),
                concat!(
                    "'",
                    stringify!($lhs),
                    "' and '",
                    stringify!($rhs),
                    "' are not equal"
                ),
            ))
        }
    };
}
