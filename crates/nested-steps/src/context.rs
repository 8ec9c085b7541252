//! State handed to step callbacks and the entry points for nested calls.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::argument::{DocString, RawArgument, StepArgument};
use crate::call_site::CallSite;
use crate::error::StepError;
use crate::invoker::StepInvoker;
use crate::localization::message_with_args;
use crate::table::Table;

/// Context shared by a step and every step it invokes.
///
/// Fixtures are borrowed for the lifetime of the context and looked up by
/// name and type. Steps needing mutable shared state store a `RefCell` or
/// `Cell`.
///
/// # Examples
/// ```
/// use std::cell::Cell;
/// use nested_steps::{Registry, StepContext, StepInvoker, StepKeyword};
///
/// let mut registry = Registry::new();
/// registry
///     .register(StepKeyword::Given, "a counter is bumped", |ctx, _| {
///         if let Some(count) = ctx.get::<Cell<u32>>("count") {
///             count.set(count.get() + 1);
///         }
///         Ok(())
///     })
///     .unwrap_or_else(|err| panic!("{err}"));
/// registry
///     .register(StepKeyword::When, "it is bumped twice", |ctx, _| {
///         ctx.steps("Given a counter is bumped\nAnd a counter is bumped")
///     })
///     .unwrap_or_else(|err| panic!("{err}"));
///
/// let count = Cell::new(0_u32);
/// let mut ctx = StepContext::new(StepInvoker::new(&registry));
/// ctx.insert("count", &count);
/// ctx.step("it is bumped twice").unwrap_or_else(|err| panic!("{err}"));
/// assert_eq!(count.get(), 2);
/// ```
pub struct StepContext<'a> {
    invoker: StepInvoker<'a>,
    fixtures: HashMap<&'static str, &'a dyn Any>,
    depth: usize,
}

impl<'a> StepContext<'a> {
    /// A context whose nested calls go through `invoker`.
    #[must_use]
    pub fn new(invoker: StepInvoker<'a>) -> Self {
        Self {
            invoker,
            fixtures: HashMap::new(),
            depth: 0,
        }
    }

    /// Share `value` with every step run through this context.
    ///
    /// A later fixture with the same name replaces the earlier one.
    pub fn insert<T: Any>(&mut self, name: &'static str, value: &'a T) {
        self.fixtures.insert(name, value);
    }

    /// Look up a fixture by name and type.
    #[must_use]
    pub fn get<T: Any>(&self, name: &str) -> Option<&'a T> {
        let value: &'a dyn Any = *self.fixtures.get(name)?;
        value.downcast_ref::<T>()
    }

    /// The invoker used for nested calls.
    #[must_use]
    pub fn invoker(&self) -> StepInvoker<'a> {
        self.invoker
    }

    /// How many step callbacks are currently running on this context.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Count one more running callback until the returned frame is dropped,
    /// including when the callback unwinds.
    pub(crate) fn enter(&mut self) -> Frame<'_, 'a> {
        self.depth += 1;
        Frame { ctx: self }
    }

    /// Run the step matching `text` with no argument.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Undefined`] when nothing matches, or the error
    /// returned by the matched step.
    #[track_caller]
    pub fn step(&mut self, text: &str) -> Result<(), StepError> {
        let invoker = self.invoker;
        invoker.invoke_one(self, text, None, Some(CallSite::caller()))
    }

    /// Run the step matching `text` with a table or doc string.
    ///
    /// # Errors
    ///
    /// As for [`step`](Self::step).
    #[track_caller]
    pub fn step_with(
        &mut self,
        text: &str,
        argument: impl Into<RawArgument>,
    ) -> Result<(), StepError> {
        let invoker = self.invoker;
        invoker.invoke_one(self, text, Some(argument.into()), Some(CallSite::caller()))
    }

    /// Run every step of a multi-line snippet in order.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Parse`] before running anything when the snippet
    /// is malformed, otherwise the first step failure.
    #[track_caller]
    pub fn steps(&mut self, snippet: &str) -> Result<(), StepError> {
        let invoker = self.invoker;
        invoker.invoke_many(self, snippet, Some(CallSite::caller()))
    }
}

impl fmt::Debug for StepContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.fixtures.keys().collect();
        names.sort_unstable();
        f.debug_struct("StepContext")
            .field("invoker", &self.invoker)
            .field("fixtures", &names)
            .field("depth", &self.depth)
            .finish()
    }
}

/// One level of nesting on a [`StepContext`].
pub(crate) struct Frame<'g, 'a> {
    ctx: &'g mut StepContext<'a>,
}

impl<'a> Frame<'_, 'a> {
    pub(crate) fn depth(&self) -> usize {
        self.ctx.depth
    }

    pub(crate) fn context(&mut self) -> &mut StepContext<'a> {
        self.ctx
    }
}

impl Drop for Frame<'_, '_> {
    fn drop(&mut self) {
        self.ctx.depth = self.ctx.depth.saturating_sub(1);
    }
}

/// What a callback receives about the invocation that matched it.
#[derive(Debug, Clone, Copy)]
pub struct StepInput<'a> {
    text: &'a str,
    captures: &'a [String],
    argument: &'a StepArgument,
}

impl<'a> StepInput<'a> {
    /// Bundle an invocation's text, captured values and argument.
    #[must_use]
    pub fn new(text: &'a str, captures: &'a [String], argument: &'a StepArgument) -> Self {
        Self {
            text,
            captures,
            argument,
        }
    }

    /// The invocation text.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Every captured value in order.
    #[must_use]
    pub fn captures(&self) -> &'a [String] {
        self.captures
    }

    /// The captured value at `index`.
    #[must_use]
    pub fn capture(&self, index: usize) -> Option<&'a str> {
        self.captures.get(index).map(String::as_str)
    }

    /// Parse the captured value at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Failed`] when the capture is missing or does not
    /// parse.
    ///
    /// # Examples
    /// ```
    /// use nested_steps::{StepArgument, StepInput};
    ///
    /// let captures = vec!["12".to_string()];
    /// let input = StepInput::new("I have 12 cukes", &captures, &StepArgument::None);
    /// assert_eq!(input.parse::<u32>(0).ok(), Some(12));
    /// assert!(input.parse::<u32>(1).is_err());
    /// ```
    pub fn parse<T>(&self, index: usize) -> Result<T, StepError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let Some(value) = self.capture(index) else {
            return Err(StepError::failed(message_with_args(
                "step-capture-missing",
                |args| {
                    args.set("text", self.text.to_owned());
                    args.set("index", index.to_string());
                },
            )));
        };
        value.parse::<T>().map_err(|error| {
            StepError::failed(message_with_args("step-capture-invalid", |args| {
                args.set("text", self.text.to_owned());
                args.set("index", index.to_string());
                args.set("value", value.to_owned());
                args.set("details", error.to_string());
            }))
        })
    }

    /// The normalised argument.
    #[must_use]
    pub fn argument(&self) -> &'a StepArgument {
        self.argument
    }

    /// The attached table, if any.
    #[must_use]
    pub fn table(&self) -> Option<&'a Table> {
        self.argument.table()
    }

    /// The attached doc string, if any.
    #[must_use]
    pub fn docstring(&self) -> Option<&'a DocString> {
        self.argument.docstring()
    }
}
