//! Step definitions and the lookup seam used by the invoker.
//!
//! [`StepRegistry`] is the only thing the engine needs from a registry: every
//! definition matching a text, in registration order. [`Registry`] is the
//! in-memory implementation; [`global_registry`] collects definitions
//! submitted with [`step!`](crate::step) at link time.

mod global;
#[cfg(feature = "diagnostics")]
mod diagnostics;

use std::fmt;
use std::panic::Location;

use nested_steps_patterns::{PatternError, StepKeyword};

use crate::argument::StepArgument;
use crate::context::{StepContext, StepInput};
use crate::error::StepError;
use crate::pattern::StepPattern;

pub use global::{StepEntry, StepFn, global_registry};

/// Callback run when a definition matches.
pub type StepHandler =
    Box<dyn Fn(&mut StepContext<'_>, &StepInput<'_>) -> Result<(), StepError> + Send + Sync>;

/// A pattern bound to the callback that implements it.
pub struct StepDefinition {
    keyword: StepKeyword,
    pattern: StepPattern,
    handler: StepHandler,
    file: &'static str,
    line: u32,
}

impl StepDefinition {
    /// Bind `handler` to `pattern`, recording where it was defined.
    pub fn new<F>(
        keyword: StepKeyword,
        pattern: StepPattern,
        handler: F,
        file: &'static str,
        line: u32,
    ) -> Self
    where
        F: Fn(&mut StepContext<'_>, &StepInput<'_>) -> Result<(), StepError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            keyword,
            pattern,
            handler: Box::new(handler),
            file,
            line,
        }
    }

    /// Keyword the definition was registered with.
    #[must_use]
    pub fn keyword(&self) -> StepKeyword {
        self.keyword
    }

    /// The definition's pattern.
    #[must_use]
    pub fn pattern(&self) -> &StepPattern {
        &self.pattern
    }

    /// Source file of the definition.
    #[must_use]
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Source line of the definition.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Bind this definition to `text` if its pattern matches.
    #[must_use]
    pub fn bind(&self, text: &str) -> Option<StepMatch<'_>> {
        self.pattern.captures(text).map(|captures| StepMatch {
            definition: self,
            captures,
        })
    }
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("keyword", &self.keyword)
            .field("pattern", &self.pattern.as_str())
            .field("file", &self.file)
            .field("line", &self.line)
            .finish_non_exhaustive()
    }
}

/// A definition bound to one invocation text and its captured values.
#[derive(Debug)]
pub struct StepMatch<'r> {
    definition: &'r StepDefinition,
    captures: Vec<String>,
}

impl<'r> StepMatch<'r> {
    /// The matched definition.
    #[must_use]
    pub fn definition(&self) -> &'r StepDefinition {
        self.definition
    }

    /// Captured pattern values in order.
    #[must_use]
    pub fn captures(&self) -> &[String] {
        &self.captures
    }

    /// Run the definition's callback.
    ///
    /// # Errors
    ///
    /// Returns whatever the callback returns, unchanged.
    pub fn invoke(
        &self,
        ctx: &mut StepContext<'_>,
        text: &str,
        argument: &StepArgument,
    ) -> Result<(), StepError> {
        let input = StepInput::new(text, &self.captures, argument);
        (self.definition.handler)(ctx, &input)
    }
}

/// Lookup of step definitions by invocation text.
pub trait StepRegistry {
    /// Every definition whose pattern matches the whole of `text`, in
    /// registration order.
    fn find_definitions(&self, text: &str) -> Vec<StepMatch<'_>>;
}

/// In-memory registry that keeps definitions in registration order.
///
/// # Examples
/// ```
/// use nested_steps::{Registry, StepKeyword};
///
/// let mut registry = Registry::new();
/// registry
///     .register(StepKeyword::Given, "the user {string} exists", |_ctx, _input| Ok(()))
///     .unwrap_or_else(|err| panic!("{err}"));
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    definitions: Vec<StepDefinition>,
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a placeholder pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when the pattern does not compile.
    #[track_caller]
    pub fn register<F>(
        &mut self,
        keyword: StepKeyword,
        pattern: &str,
        handler: F,
    ) -> Result<&mut Self, PatternError>
    where
        F: Fn(&mut StepContext<'_>, &StepInput<'_>) -> Result<(), StepError>
            + Send
            + Sync
            + 'static,
    {
        let pattern = StepPattern::new(pattern)?;
        Ok(self.push_from_caller(keyword, pattern, handler))
    }

    /// Register a regular expression pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Regex`] when the expression does not compile.
    #[track_caller]
    pub fn register_regex<F>(
        &mut self,
        keyword: StepKeyword,
        source: &str,
        handler: F,
    ) -> Result<&mut Self, PatternError>
    where
        F: Fn(&mut StepContext<'_>, &StepInput<'_>) -> Result<(), StepError>
            + Send
            + Sync
            + 'static,
    {
        let pattern = StepPattern::regex(source)?;
        Ok(self.push_from_caller(keyword, pattern, handler))
    }

    #[track_caller]
    fn push_from_caller<F>(&mut self, keyword: StepKeyword, pattern: StepPattern, handler: F) -> &mut Self
    where
        F: Fn(&mut StepContext<'_>, &StepInput<'_>) -> Result<(), StepError>
            + Send
            + Sync
            + 'static,
    {
        let location = Location::caller();
        self.add(StepDefinition::new(
            keyword,
            pattern,
            handler,
            location.file(),
            location.line(),
        ))
    }

    /// Append a prepared definition.
    pub fn add(&mut self, definition: StepDefinition) -> &mut Self {
        self.definitions.push(definition);
        self
    }

    /// Definitions in registration order.
    #[must_use]
    pub fn definitions(&self) -> &[StepDefinition] {
        &self.definitions
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Groups of definitions that share the same pattern text.
    ///
    /// Only the first of each group can ever run under first-match dispatch.
    #[must_use]
    pub fn duplicate_patterns(&self) -> Vec<Vec<&StepDefinition>> {
        let mut groups: Vec<Vec<&StepDefinition>> = Vec::new();
        for definition in &self.definitions {
            let existing = groups.iter_mut().find(|group| {
                group
                    .first()
                    .is_some_and(|first| first.pattern == definition.pattern)
            });
            if let Some(group) = existing {
                group.push(definition);
                continue;
            }
            groups.push(vec![definition]);
        }
        groups.retain(|group| group.len() > 1);
        groups
    }
}

impl StepRegistry for Registry {
    fn find_definitions(&self, text: &str) -> Vec<StepMatch<'_>> {
        self.definitions
            .iter()
            .filter_map(|definition| definition.bind(text))
            .collect()
    }
}

#[cfg(test)]
mod tests;
