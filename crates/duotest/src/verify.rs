//! Inline verification: check a value and keep using it.
//!
//! ```
//! use duotest::verify::{v, vn, Expect, Verify};
//! use duotest::TestResult;
//!
//! fn increment(n: i32) -> i32 {
//!     n + 1
//! }
//!
//! fn body() -> TestResult {
//!     let two = v(increment(1), 2)?;
//!     let three = (increment(two) & 3.expected())?;
//!     let four = (Verify::new(4) & increment(three))?;
//!     let twelve = (12_i32 ^ 11.expected())?;
//!     let name = vn("good", "bad")?;
//!     assert_eq!((four, twelve, name), (4, 12, "good"));
//!     Ok(())
//! }
//! assert!(body().is_ok());
//! ```

use crate::failure::{TestFailure, TestResult};
use crate::location::SourceLocation;
use std::ops::{BitAnd, BitXor};

/// An expected value waiting for the actual one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verify<T> {
    pub expected: T,
}

impl<T> Verify<T> {
    pub const fn new(expected: T) -> Self {
        Self { expected }
    }
}

/// Wrap a value as an expectation: `3.expected()`.
pub trait Expect: Sized {
    fn expected(self) -> Verify<Self> {
        Verify::new(self)
    }
}

impl<T> Expect for T {}

const NOT_EQUAL: &str = "Lhs != rhs";
const EQUAL: &str = "Lhs == rhs";

#[track_caller]
fn check_equal<A, T>(actual: A, expected: &T) -> TestResult<A>
where
    A: PartialEq<T>,
{
    if actual != *expected {
        return Err(TestFailure::new(SourceLocation::caller(), NOT_EQUAL));
    }
    Ok(actual)
}

#[track_caller]
fn check_unequal<A, T>(actual: A, expected: &T) -> TestResult<A>
where
    A: PartialEq<T>,
{
    if actual == *expected {
        return Err(TestFailure::new(SourceLocation::caller(), EQUAL));
    }
    Ok(actual)
}

/// Returns `actual` if it equals `expected`, fails otherwise.
#[track_caller]
pub fn v<A, T>(actual: A, expected: T) -> TestResult<A>
where
    A: PartialEq<T>,
{
    check_equal(actual, &expected)
}

/// Returns `actual` if it differs from `expected`, fails otherwise.
#[track_caller]
pub fn vn<A, T>(actual: A, expected: T) -> TestResult<A>
where
    A: PartialEq<T>,
{
    check_unequal(actual, &expected)
}

/// `Verify(expected) & actual`: equality.
impl<T, A> BitAnd<A> for Verify<T>
where
    A: PartialEq<T>,
{
    type Output = TestResult<A>;

    #[track_caller]
    fn bitand(self, actual: A) -> TestResult<A> {
        check_equal(actual, &self.expected)
    }
}

/// `Verify(expected) ^ actual`: inequality.
impl<T, A> BitXor<A> for Verify<T>
where
    A: PartialEq<T>,
{
    type Output = TestResult<A>;

    #[track_caller]
    fn bitxor(self, actual: A) -> TestResult<A> {
        check_unequal(actual, &self.expected)
    }
}

// `actual & Verify(expected)` can only be written for concrete left-hand types.
macro_rules! actual_first {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<T> BitAnd<Verify<T>> for $ty
            where
                $ty: PartialEq<T>,
            {
                type Output = TestResult<$ty>;

                #[track_caller]
                fn bitand(self, expected: Verify<T>) -> TestResult<$ty> {
                    check_equal(self, &expected.expected)
                }
            }

            impl<T> BitXor<Verify<T>> for $ty
            where
                $ty: PartialEq<T>,
            {
                type Output = TestResult<$ty>;

                #[track_caller]
                fn bitxor(self, expected: Verify<T>) -> TestResult<$ty> {
                    check_unequal(self, &expected.expected)
                }
            }
        )+
    };
}

actual_first!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
    String,
);

impl<'a, T> BitAnd<Verify<T>> for &'a str
where
    &'a str: PartialEq<T>,
{
    type Output = TestResult<&'a str>;

    #[track_caller]
    fn bitand(self, expected: Verify<T>) -> TestResult<&'a str> {
        check_equal(self, &expected.expected)
    }
}

impl<'a, T> BitXor<Verify<T>> for &'a str
where
    &'a str: PartialEq<T>,
{
    type Output = TestResult<&'a str>;

    #[track_caller]
    fn bitxor(self, expected: Verify<T>) -> TestResult<&'a str> {
        check_unequal(self, &expected.expected)
    }
}
