//! Stringification of checked values for failure messages.
//!
//! `render!(value)` picks the first rendering the value's type supports:
//! 1. `Display`
//! 2. [`Underlying`] (field-less enums rendered as their integer)
//! 3. the [`UNPRINTABLE`] placeholder
//!
//! The choice is made with autoref method resolution at the macro call site,
//! so it only sees concrete types. Generic code should bound on `Display`.

use std::fmt::Display;

/// Placeholder for values with no text rendering.
pub const UNPRINTABLE: &str = "<UNPRINTABLE>";

/// Integer representation of a field-less enum.
///
/// Implement with [`underlying_repr!`](crate::underlying_repr).
pub trait Underlying {
    type Repr: Display;

    fn underlying(&self) -> Self::Repr;
}

impl<T: Underlying + ?Sized> Underlying for &T {
    type Repr = T::Repr;

    fn underlying(&self) -> Self::Repr {
        (**self).underlying()
    }
}

/// Implement [`Underlying`] for `Copy` field-less enums.
///
/// ```
/// #[derive(Clone, Copy, PartialEq)]
/// enum Light { Red = 1, Green = 2 }
/// duotest::underlying_repr!(Light as u8);
/// assert_eq!(duotest::render!(Light::Green), "2");
/// ```
#[macro_export]
macro_rules! underlying_repr {
    ($($ty:ty as $repr:ty),+ $(,)?) => {
        $(
            impl $crate::render::Underlying for $ty {
                type Repr = $repr;

                fn underlying(&self) -> $repr {
                    *self as $repr
                }
            }
        )+
    };
}

#[doc(hidden)]
pub struct Probe<'a, T: ?Sized>(pub &'a T);

#[doc(hidden)]
pub trait ViaDisplay {
    fn render(&self) -> String;
}

impl<T: Display + ?Sized> ViaDisplay for &&Probe<'_, T> {
    fn render(&self) -> String {
        self.0.to_string()
    }
}

#[doc(hidden)]
pub trait ViaUnderlying {
    fn render(&self) -> String;
}

impl<T: Underlying + ?Sized> ViaUnderlying for &Probe<'_, T> {
    fn render(&self) -> String {
        self.0.underlying().to_string()
    }
}

#[doc(hidden)]
pub trait ViaPlaceholder {
    fn render(&self) -> String;
}

impl<T: ?Sized> ViaPlaceholder for Probe<'_, T> {
    fn render(&self) -> String {
        UNPRINTABLE.to_string()
    }
}

/// Render a value as text. See the [module docs](crate::render).
#[macro_export]
macro_rules! render {
    ($value:expr) => {{
        #[allow(unused_imports)]
        use $crate::render::{ViaDisplay as _, ViaPlaceholder as _, ViaUnderlying as _};
        (&&&$crate::render::Probe(&$value)).render()
    }};
}

/// Join rendered call arguments for failure messages.
pub fn join_args(rendered: &[String]) -> String {
    rendered.join(", ")
}
