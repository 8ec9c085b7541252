//! Run registered steps from inside other steps.
//!
//! A step callback receives a [`StepContext`] and can hand it more scenario
//! text: [`StepContext::step`] runs one step, [`StepContext::step_with`]
//! attaches a table or doc string, and [`StepContext::steps`] runs a whole
//! snippet such as
//!
//! ```text
//! Given the user "Susan" exists
//! And I am logged in as "Susan"
//! ```
//!
//! Each line is matched against a [`StepRegistry`] and the first matching
//! definition runs immediately, on the calling thread. Failures come back as
//! [`StepError`] values, so `ctx.step(..)?` hands an inner failure to the
//! outer step untouched.
//!
//! ```
//! use std::cell::RefCell;
//! use nested_steps::{Registry, StepContext, StepInvoker, StepKeyword};
//!
//! let mut registry = Registry::new();
//! registry
//!     .register(StepKeyword::Given, "the user {string} exists", |ctx, input| {
//!         if let Some(users) = ctx.get::<RefCell<Vec<String>>>("users") {
//!             users.borrow_mut().push(input.capture(0).unwrap_or_default().to_owned());
//!         }
//!         Ok(())
//!     })
//!     .and_then(|r| {
//!         r.register(StepKeyword::Given, "two users exist", |ctx, _| {
//!             ctx.steps("Given the user \"Susan\" exists\nAnd the user \"Dave\" exists")
//!         })
//!     })
//!     .unwrap_or_else(|err| panic!("{err}"));
//!
//! let users = RefCell::new(Vec::<String>::new());
//! let mut ctx = StepContext::new(StepInvoker::new(&registry));
//! ctx.insert("users", &users);
//! ctx.step("two users exist").unwrap_or_else(|err| panic!("{err}"));
//! drop(ctx);
//! assert_eq!(users.into_inner(), ["Susan", "Dave"]);
//! ```

mod argument;
mod call_site;
pub mod config;
mod context;
mod error;
mod invoker;
pub mod localization;
mod macros;
mod matcher;
mod pattern;
mod registry;
mod snippet;
mod table;

pub use argument::{DocString, RawArgument, StepArgument, normalize};
pub use call_site::CallSite;
pub use context::{StepContext, StepInput};
pub use error::{StepError, UndefinedStep};
pub use invoker::{MatchPolicy, StepInvoker};
pub use inventory::{iter, submit};
#[doc(hidden)]
pub use macros::__assert_display_contains;
pub use matcher::StepMatcher;
pub use nested_steps_patterns::{PatternError, StepKeyword};
pub use pattern::{PatternKind, StepPattern};
pub use registry::{
    Registry, StepDefinition, StepEntry, StepFn, StepHandler, StepMatch, StepRegistry,
    global_registry,
};
pub use snippet::{
    Dialect, GherkinGrammar, InvocationRecord, ParseErrorKind, SnippetGrammar, SnippetParseError,
    SnippetParser,
};
pub use table::{Table, TableError};
