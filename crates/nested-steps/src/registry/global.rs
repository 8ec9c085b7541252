//! Link-time step registration.

use std::sync::LazyLock;

use log::debug;
use nested_steps_patterns::StepKeyword;

use super::{Registry, StepDefinition};
use crate::context::{StepContext, StepInput};
use crate::error::StepError;
use crate::pattern::StepPattern;

/// Signature of a function registered with [`step!`](crate::step).
pub type StepFn = fn(&mut StepContext<'_>, &StepInput<'_>) -> Result<(), StepError>;

/// A step submitted to the global registry.
#[derive(Debug)]
pub struct StepEntry {
    /// Keyword the step was declared with.
    pub keyword: StepKeyword,
    /// Placeholder pattern text.
    pub pattern: &'static str,
    /// Function run when the pattern matches.
    pub run: StepFn,
    /// Source file of the declaration.
    pub file: &'static str,
    /// Source line of the declaration.
    pub line: u32,
}

/// Register a step function with the global registry.
///
/// ```
/// use nested_steps::{step, StepContext, StepError, StepInput, StepKeyword};
///
/// fn logged_in(_ctx: &mut StepContext<'_>, _input: &StepInput<'_>) -> Result<(), StepError> {
///     Ok(())
/// }
///
/// step!(StepKeyword::Given, "I am logged in", logged_in);
/// ```
#[macro_export]
macro_rules! step {
    ($keyword:expr, $pattern:expr, $handler:path $(,)?) => {
        $crate::submit! {
            $crate::StepEntry {
                keyword: $keyword,
                pattern: $pattern,
                run: $handler,
                file: file!(),
                line: line!(),
            }
        }
    };
}

inventory::collect!(StepEntry);

static GLOBAL: LazyLock<Registry> = LazyLock::new(|| {
    let mut entries: Vec<&StepEntry> = inventory::iter::<StepEntry>.into_iter().collect();
    entries.sort_by_key(|entry| (entry.file, entry.line));
    let mut registry = Registry::new();
    for entry in entries {
        let pattern = StepPattern::new(entry.pattern).unwrap_or_else(|e| {
            panic!(
                "invalid step pattern '{}' at {}:{}: {e}",
                entry.pattern, entry.file, entry.line
            )
        });
        registry.add(StepDefinition::new(
            entry.keyword,
            pattern,
            entry.run,
            entry.file,
            entry.line,
        ));
    }
    debug!("global step registry holds {} definition(s)", registry.len());
    registry
});

/// The registry built from every [`step!`](crate::step) in the binary.
///
/// Definitions are ordered by source file and then line, so first-match
/// dispatch is stable across builds.
///
/// # Panics
///
/// Panics on first use if a submitted pattern does not compile.
#[must_use]
pub fn global_registry() -> &'static Registry {
    &GLOBAL
}
