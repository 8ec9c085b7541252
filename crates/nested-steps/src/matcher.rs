//! Resolving invocation text to candidate definitions.

use log::trace;

use crate::registry::{StepMatch, StepRegistry};

/// Finds every definition matching an invocation text.
///
/// Candidates keep the registry's order; no specificity ranking is applied.
#[derive(Clone, Copy)]
pub struct StepMatcher<'r> {
    registry: &'r dyn StepRegistry,
}

impl<'r> StepMatcher<'r> {
    /// A matcher over `registry`.
    #[must_use]
    pub fn new(registry: &'r dyn StepRegistry) -> Self {
        Self { registry }
    }

    /// All matches for `text`. An empty result is not an error here.
    #[must_use]
    pub fn find_matches(&self, text: &str) -> Vec<StepMatch<'r>> {
        let matches = self.registry.find_definitions(text);
        for candidate in &matches {
            let definition = candidate.definition();
            trace!(
                "step {text:?} matches '{}' ({}:{}) with captures {:?}",
                definition.pattern(),
                definition.file(),
                definition.line(),
                candidate.captures()
            );
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use nested_steps_patterns::StepKeyword;

    #[test]
    fn keeps_registration_order() {
        let mut registry = Registry::new();
        for pattern in ["I pay {amount}", "I pay {n:u32}", "I refund {amount}"] {
            registry
                .register(StepKeyword::When, pattern, |_, _| Ok(()))
                .unwrap_or_else(|err| panic!("{err}"));
        }
        let matcher = StepMatcher::new(&registry);
        let patterns: Vec<String> = matcher
            .find_matches("I pay 5")
            .iter()
            .map(|m| m.definition().pattern().to_string())
            .collect();
        assert_eq!(patterns, ["I pay {amount}", "I pay {n:u32}"]);
        assert!(matcher.find_matches("I pay").is_empty());
    }
}
