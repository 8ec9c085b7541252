//! Dispatch of single invocations and whole snippets.
//!
//! [`StepInvoker`] is a `Copy` bundle of shared references: the registry, the
//! snippet grammar and a [`MatchPolicy`]. It holds no state of its own, so a
//! callback can re-enter it through its [`StepContext`] to any depth.

use std::fmt;

use log::{debug, warn};

use crate::argument::{RawArgument, normalize};
use crate::call_site::CallSite;
use crate::config;
use crate::context::StepContext;
use crate::error::{StepError, UndefinedStep};
use crate::matcher::StepMatcher;
use crate::registry::StepRegistry;
use crate::snippet::{SnippetGrammar, SnippetParser};

/// What to do when several definitions match one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Run the first registered match.
    #[default]
    FirstMatch,
    /// Fail with [`StepError::Ambiguous`].
    RejectAmbiguous,
}

impl MatchPolicy {
    /// The policy selected by `NESTED_STEPS_STRICT_MATCHING` or its
    /// in-process override.
    #[must_use]
    pub fn configured() -> Self {
        if config::strict_matching() {
            Self::RejectAmbiguous
        } else {
            Self::FirstMatch
        }
    }
}

/// Resolves invocation text against a registry and runs the match.
#[derive(Clone, Copy)]
pub struct StepInvoker<'r> {
    registry: &'r dyn StepRegistry,
    grammar: &'r dyn SnippetGrammar,
    policy: MatchPolicy,
}

impl<'r> StepInvoker<'r> {
    /// An invoker over `registry` using the configured snippet language and
    /// match policy.
    #[must_use]
    pub fn new(registry: &'r dyn StepRegistry) -> Self {
        Self {
            registry,
            grammar: SnippetParser::configured(),
            policy: MatchPolicy::configured(),
        }
    }

    /// Replace the snippet grammar.
    #[must_use]
    pub fn with_grammar(self, grammar: &'r dyn SnippetGrammar) -> Self {
        Self { grammar, ..self }
    }

    /// Replace the match policy.
    #[must_use]
    pub fn with_policy(self, policy: MatchPolicy) -> Self {
        Self { policy, ..self }
    }

    /// The active match policy.
    #[must_use]
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Run the step matching `text`.
    ///
    /// Only the first match runs, unless the policy rejects ambiguity. The
    /// callback's outcome is returned unchanged and panics unwind through.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Undefined`] when nothing matches,
    /// [`StepError::Ambiguous`] under [`MatchPolicy::RejectAmbiguous`], or the
    /// error returned by the callback.
    pub fn invoke_one(
        &self,
        ctx: &mut StepContext<'_>,
        text: &str,
        raw_argument: Option<RawArgument>,
        call_site: Option<CallSite>,
    ) -> Result<(), StepError> {
        let argument = normalize(raw_argument);
        let matches = StepMatcher::new(self.registry).find_matches(text);
        let Some((first, rest)) = matches.split_first() else {
            return Err(StepError::Undefined(UndefinedStep::new(text, call_site)));
        };
        if !rest.is_empty() {
            if self.policy == MatchPolicy::RejectAmbiguous {
                return Err(StepError::Ambiguous {
                    text: text.to_owned(),
                    patterns: matches
                        .iter()
                        .map(|candidate| candidate.definition().pattern().to_string())
                        .collect(),
                    call_site,
                });
            }
            let chosen = first.definition();
            warn!(
                "step {text:?} matches {} definitions; running '{}' from {}:{}",
                matches.len(),
                chosen.pattern(),
                chosen.file(),
                chosen.line()
            );
        }

        let mut frame = ctx.enter();
        let depth = frame.depth();
        debug!(
            "dispatching step {text:?} at depth {depth}{}",
            call_site.map_or_else(String::new, |site| format!(" from {site}"))
        );
        let result = first.invoke(frame.context(), text, &argument);
        drop(frame);
        if let Err(error) = &result {
            debug!(
                "step {text:?} failed at depth {depth}{}: {error}",
                call_site.map_or_else(String::new, |site| format!(" (invoked from {site})"))
            );
        }
        result
    }

    /// Parse `snippet` and run its steps in order, stopping at the first
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Parse`] before anything runs when the snippet is
    /// malformed, otherwise the first error from [`invoke_one`](Self::invoke_one).
    pub fn invoke_many(
        &self,
        ctx: &mut StepContext<'_>,
        snippet: &str,
        call_site: Option<CallSite>,
    ) -> Result<(), StepError> {
        let records = self.grammar.parse(snippet)?;
        records
            .into_iter()
            .try_for_each(|record| self.invoke_one(ctx, &record.text, record.raw_argument, call_site))
    }
}

impl fmt::Debug for StepInvoker<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepInvoker")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
