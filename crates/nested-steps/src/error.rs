//! Errors produced while resolving and running nested steps.

use std::error::Error as StdError;
use std::fmt;

use crate::call_site::CallSite;
use crate::localization::message_with_args;
use crate::snippet::SnippetParseError;

/// No registered definition matched an invocation.
///
/// Two values are equal when their step text is equal; the call site is kept
/// for messages only.
#[derive(Debug, Clone)]
pub struct UndefinedStep {
    text: String,
    call_site: Option<CallSite>,
}

impl UndefinedStep {
    /// Record an undefined step.
    #[must_use]
    pub fn new(text: impl Into<String>, call_site: Option<CallSite>) -> Self {
        Self {
            text: text.into(),
            call_site,
        }
    }

    /// The invocation text exactly as requested.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Where the invocation was requested from.
    #[must_use]
    pub fn call_site(&self) -> Option<CallSite> {
        self.call_site
    }
}

impl PartialEq for UndefinedStep {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for UndefinedStep {}

impl fmt::Display for UndefinedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = message_with_args("step-error-undefined", |args| {
            args.set("text", self.text.clone());
            args.set("suffix", suffix(self.call_site));
        });
        f.write_str(&rendered)
    }
}

impl StdError for UndefinedStep {}

fn suffix(call_site: Option<CallSite>) -> String {
    call_site.map_or_else(String::new, |site| {
        let rendered = message_with_args("step-call-site-suffix", |args| {
            args.set("location", site.to_string());
        });
        format!(" {rendered}")
    })
}

/// Failure of a nested step invocation.
///
/// The engine creates `Parse`, `Undefined` and `Ambiguous`. `Failed` and
/// `Other` come from step callbacks and are passed through untouched, so an
/// inner failure surfaces unchanged however deeply it was nested.
#[derive(Debug)]
#[non_exhaustive]
pub enum StepError {
    /// The snippet could not be parsed; none of it ran.
    Parse(SnippetParseError),
    /// No definition matched.
    Undefined(UndefinedStep),
    /// Several definitions matched under [`MatchPolicy::RejectAmbiguous`].
    ///
    /// [`MatchPolicy::RejectAmbiguous`]: crate::MatchPolicy::RejectAmbiguous
    Ambiguous {
        /// The invocation text.
        text: String,
        /// Competing patterns in registration order.
        patterns: Vec<String>,
        /// Where the invocation was requested from.
        call_site: Option<CallSite>,
    },
    /// A step reported a failure.
    Failed {
        /// Description of the failure.
        message: String,
    },
    /// A step failed with an arbitrary error.
    Other(Box<dyn StdError + Send + Sync + 'static>),
}

impl StepError {
    /// A step failure with a message.
    ///
    /// # Examples
    /// ```
    /// use nested_steps::StepError;
    ///
    /// let err = StepError::failed("balance was 3, expected 5");
    /// assert!(err.to_string().contains("balance was 3"));
    /// ```
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Wrap an arbitrary error raised by a step.
    #[must_use]
    pub fn other(error: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
        Self::Other(error.into())
    }

    /// The undefined step, if this is an [`Undefined`](Self::Undefined) error.
    #[must_use]
    pub fn as_undefined(&self) -> Option<&UndefinedStep> {
        match self {
            Self::Undefined(undefined) => Some(undefined),
            _ => None,
        }
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(error) => error.fmt(f),
            Self::Undefined(undefined) => undefined.fmt(f),
            Self::Ambiguous {
                text,
                patterns,
                call_site,
            } => {
                let listed = patterns
                    .iter()
                    .map(|pattern| format!("'{pattern}'"))
                    .collect::<Vec<_>>()
                    .join(", ");
                let rendered = message_with_args("step-error-ambiguous", |args| {
                    args.set("text", text.clone());
                    args.set("count", patterns.len().to_string());
                    args.set("patterns", listed);
                    args.set("suffix", suffix(*call_site));
                });
                f.write_str(&rendered)
            }
            Self::Failed { message } => {
                let rendered = message_with_args("step-error-failed", |args| {
                    args.set("message", message.clone());
                });
                f.write_str(&rendered)
            }
            Self::Other(error) => error.fmt(f),
        }
    }
}

impl StdError for StepError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Parse(error) => Some(error),
            Self::Undefined(undefined) => Some(undefined),
            Self::Other(error) => Some(error.as_ref()),
            Self::Ambiguous { .. } | Self::Failed { .. } => None,
        }
    }
}

impl From<SnippetParseError> for StepError {
    fn from(error: SnippetParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<UndefinedStep> for StepError {
    fn from(undefined: UndefinedStep) -> Self {
        Self::Undefined(undefined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> CallSite {
        CallSite {
            file: "tests/login.rs",
            line: 7,
            column: 5,
        }
    }

    #[test]
    fn undefined_equality_ignores_call_site() {
        assert_eq!(
            UndefinedStep::new("I am logged in", Some(site())),
            UndefinedStep::new("I am logged in", None)
        );
        assert_ne!(
            UndefinedStep::new("I am logged in", None),
            UndefinedStep::new("I am logged out", None)
        );
    }

    #[test]
    fn undefined_message_mentions_text_and_call_site() {
        let rendered = StepError::from(UndefinedStep::new("I am logged in", Some(site()))).to_string();
        assert_eq!(
            rendered,
            "Undefined step: \"I am logged in\" (invoked from tests/login.rs:7:5)"
        );
        let bare = UndefinedStep::new("I am logged in", None).to_string();
        assert_eq!(bare, "Undefined step: \"I am logged in\"");
    }

    #[test]
    fn ambiguous_message_lists_patterns() {
        let err = StepError::Ambiguous {
            text: "I pay 5".into(),
            patterns: vec!["I pay {n:u32}".into(), "I pay {amount}".into()],
            call_site: None,
        };
        let rendered = err.to_string();
        assert!(rendered.contains("2 definitions"), "{rendered}");
        assert!(rendered.contains("'I pay {amount}'"), "{rendered}");
    }

    #[test]
    fn other_errors_keep_their_source() {
        let io = std::io::Error::other("disk full");
        let err = StepError::other(io);
        assert_eq!(err.to_string(), "disk full");
        assert!(err.source().is_some());
        assert!(err.as_undefined().is_none());
    }
}
