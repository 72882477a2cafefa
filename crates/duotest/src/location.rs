//! Source locations attached to every failed check.

use std::fmt;

/// Where a check was written: file, line, column and enclosing function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
    pub function: &'static str,
}

/// Function slot used when the enclosing function cannot be recovered.
pub const UNKNOWN_FUNCTION: &str = "<unknown>";

impl SourceLocation {
    pub const fn new(file: &'static str, line: u32, column: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            column,
            function,
        }
    }

    /// Location of the caller, for call sites that cannot go through `here!()`
    /// (operator overloads). The function slot is [`UNKNOWN_FUNCTION`].
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(
            location.file(),
            location.line(),
            location.column(),
            UNKNOWN_FUNCTION,
        )
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{} in {}()",
            self.file, self.line, self.column, self.function
        )
    }
}

#[doc(hidden)]
pub fn type_name_of<T>(_: T) -> &'static str {
    std::any::type_name::<T>()
}

/// Reduce the type path of a marker item to the name of the function that
/// contains it, skipping closures.
#[doc(hidden)]
pub fn enclosing_function(marker_path: &'static str) -> &'static str {
    let mut path = marker_path.strip_suffix("::marker").unwrap_or(marker_path);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    match path.rfind("::") {
        Some(idx) => &path[idx + 2..],
        None => path,
    }
}

/// Name of the enclosing function.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn marker() {}
        $crate::location::enclosing_function($crate::location::type_name_of(marker))
    }};
}

/// Capture the current [`SourceLocation`].
#[macro_export]
macro_rules! here {
    () => {
        $crate::SourceLocation::new(file!(), line!(), column!(), $crate::function_name!())
    };
}

/// Capture the current [`SourceLocation`] in a `const fn`. Type names are not
/// available during constant evaluation, so the function slot holds the
/// module path.
#[macro_export]
macro_rules! here_const {
    () => {
        $crate::SourceLocation::new(file!(), line!(), column!(), module_path!())
    };
}
