//! Assertion macros for tests that drive nested steps.

/// Assert that a step result is `Ok` and return the value.
///
/// # Examples
/// ```
/// use nested_steps::{assert_step_ok, StepError};
///
/// let res: Result<u32, StepError> = Ok(3);
/// assert_eq!(assert_step_ok!(res), 3);
/// ```
#[macro_export]
macro_rules! assert_step_ok {
    ($expr:expr $(,)?) => {
        match $expr {
            Ok(value) => value,
            Err(e) => $crate::panic_localized!("assert-step-ok-panic", error = e),
        }
    };
}

/// Assert that a step result is `Err` and return the error.
///
/// With a second argument, also assert that the error's display contains it.
///
/// # Examples
/// ```
/// use nested_steps::{assert_step_err, StepError};
///
/// let res: Result<(), StepError> = Err(StepError::failed("boom"));
/// let err = assert_step_err!(res, "boom");
/// assert!(matches!(err, StepError::Failed { .. }));
/// ```
#[macro_export]
macro_rules! assert_step_err {
    ($expr:expr $(,)?) => {
        match $expr {
            Ok(_) => $crate::panic_localized!("assert-step-err-success"),
            Err(e) => e,
        }
    };
    ($expr:expr, $needle:expr $(,)?) => {{
        let error = $crate::assert_step_err!($expr);
        $crate::__assert_display_contains(&error, ::core::convert::AsRef::<str>::as_ref(&$needle));
        error
    }};
}

/// Assert that a step result failed because `text` matched no definition.
///
/// # Examples
/// ```
/// use nested_steps::{assert_step_undefined, StepError, UndefinedStep};
///
/// let res: Result<(), StepError> = Err(UndefinedStep::new("I am logged in", None).into());
/// assert_step_undefined!(res, "I am logged in");
/// ```
#[macro_export]
macro_rules! assert_step_undefined {
    ($expr:expr, $text:expr $(,)?) => {{
        let error = $crate::assert_step_err!($expr);
        let expected: &str = ::core::convert::AsRef::<str>::as_ref(&$text);
        match error.as_undefined() {
            Some(undefined) => assert_eq!(undefined.text(), expected),
            None => panic!("expected undefined step {expected:?}, got: {error}"),
        }
    }};
}

/// Support for [`assert_step_err!`]; not part of the public API.
#[doc(hidden)]
#[track_caller]
pub fn __assert_display_contains(error: &dyn std::fmt::Display, needle: &str) {
    let display = error.to_string();
    assert!(
        display.contains(needle),
        "{}",
        crate::localization::message_with_args("assert-step-err-missing-substring", |args| {
            args.set("display", display.clone());
            args.set("expected", needle.to_owned());
        })
    );
}
