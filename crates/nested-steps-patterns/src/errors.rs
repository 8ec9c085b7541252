//! Errors raised while turning a step pattern into a regular expression.

use thiserror::Error;

/// Errors surfaced while compiling a step pattern.
///
/// Positions are zero-based byte offsets into the pattern text.
///
/// # Examples
/// ```
/// use nested_steps_patterns::{PatternError, build_regex_source};
///
/// let err = build_regex_source("a {broken").unwrap_err();
/// assert!(matches!(err, PatternError::UnclosedPlaceholder { position: 2, .. }));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PatternError {
    /// A placeholder was opened but never closed.
    #[error("missing closing '}}' for placeholder `{name}` at byte {position}")]
    UnclosedPlaceholder {
        /// Offset of the opening brace.
        position: usize,
        /// Placeholder name read so far.
        name: String,
    },
    /// The placeholder body is not `name` or `name:hint`.
    #[error("invalid placeholder `{name}` at byte {position}")]
    InvalidPlaceholder {
        /// Offset of the opening brace.
        position: usize,
        /// Placeholder name read so far.
        name: String,
    },
    /// A literal brace has no partner.
    #[error("unbalanced brace '{brace}' at byte {position}")]
    UnbalancedBrace {
        /// Offset of the offending brace.
        position: usize,
        /// The brace character.
        brace: char,
    },
    /// The generated or supplied regular expression failed to compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}
