//! The failure channel shared by runtime and compile-time tests.

use crate::location::SourceLocation;
use std::borrow::Cow;
use thiserror::Error;

/// A failed check: where it happened and what went wrong.
///
/// Displays as the diagnostic line printed before `FAILED: <name>`:
/// `<file>:<line>:<column> in <function>(): <message>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {message}")]
pub struct TestFailure {
    pub location: SourceLocation,
    pub message: Cow<'static, str>,
}

/// Result of a test body or a single check.
pub type TestResult<T = ()> = Result<T, TestFailure>;

impl TestFailure {
    /// Failure with a static message. Usable in `const fn`.
    pub const fn new(location: SourceLocation, message: &'static str) -> Self {
        Self {
            location,
            message: Cow::Borrowed(message),
        }
    }

    /// Failure with a formatted message.
    pub fn formatted(location: SourceLocation, message: String) -> Self {
        Self {
            location,
            message: Cow::Owned(message),
        }
    }

    /// The message when it is known at compile time.
    pub const fn static_message(&self) -> Option<&'static str> {
        match &self.message {
            Cow::Borrowed(message) => Some(*message),
            Cow::Owned(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOC: SourceLocation = SourceLocation::new("tests/demo.rs", 3, 9, "demo");

    #[test]
    fn test_display_is_diagnostic_line() {
        let failure = TestFailure::new(LOC, "Value is false");
        assert_eq!(
            failure.to_string(),
            "tests/demo.rs:3:9 in demo(): Value is false"
        );
    }

    #[test]
    fn test_static_message() {
        assert_eq!(
            TestFailure::new(LOC, "static").static_message(),
            Some("static")
        );
        assert_eq!(
            TestFailure::formatted(LOC, "owned".to_string()).static_message(),
            None
        );
    }
}
