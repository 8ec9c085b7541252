//! Step patterns bound to their compiled matchers.

use std::fmt;

use nested_steps_patterns::{CompiledPattern, PatternError, compile_pattern};
use regex::Regex;

/// How a pattern's text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Literal text with `{name}` or `{name:type}` placeholders.
    Placeholder,
    /// A regular expression, anchored to the whole step text.
    Regex,
}

/// A compiled step pattern.
///
/// # Examples
/// ```
/// use nested_steps::StepPattern;
///
/// let pattern = StepPattern::new("the user {string} exists")
///     .unwrap_or_else(|err| panic!("{err}"));
/// assert_eq!(
///     pattern.captures("the user \"Susan\" exists"),
///     Some(vec!["Susan".to_string()])
/// );
/// assert_eq!(pattern.captures("the user Susan exists"), None);
/// ```
#[derive(Debug, Clone)]
pub struct StepPattern {
    text: String,
    kind: PatternKind,
    compiled: CompiledPattern,
}

impl StepPattern {
    /// Compile a placeholder pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] for malformed placeholders or braces.
    pub fn new(text: impl Into<String>) -> Result<Self, PatternError> {
        let text = text.into();
        let compiled = compile_pattern(&text)?;
        Ok(Self {
            text,
            kind: PatternKind::Placeholder,
            compiled,
        })
    }

    /// Compile a regular expression pattern.
    ///
    /// The expression is anchored so it must match the whole step text;
    /// explicit `^` and `$` are accepted as well.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Regex`] when the expression is invalid.
    pub fn regex(source: impl Into<String>) -> Result<Self, PatternError> {
        let text = source.into();
        let regex = Regex::new(&format!("^(?:{text})$"))?;
        Ok(Self {
            text,
            kind: PatternKind::Regex,
            compiled: CompiledPattern::from_regex(regex),
        })
    }

    /// The pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether this is a placeholder or regex pattern.
    #[must_use]
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Captured values when `text` matches the whole pattern.
    #[must_use]
    pub fn captures(&self, text: &str) -> Option<Vec<String>> {
        self.compiled.captures(text)
    }
}

impl PartialEq for StepPattern {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl Eq for StepPattern {}

impl fmt::Display for StepPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("I am logged in as {string}", "I am logged in as \"Susan\"", &["Susan"])]
    #[case("I have {count:u32} cukes", "I have 12 cukes", &["12"])]
    #[case("I am logged in", "I am logged in", &[])]
    fn placeholder_patterns_capture(
        #[case] pattern: &str,
        #[case] text: &str,
        #[case] expected: &[&str],
    ) {
        let pattern = StepPattern::new(pattern).unwrap_or_else(|err| panic!("{err}"));
        let expected: Vec<String> = expected.iter().map(|s| (*s).to_owned()).collect();
        assert_eq!(pattern.captures(text), Some(expected));
    }

    #[rstest]
    #[case(r#"the user "([^"]*)" exists"#)]
    #[case(r#"^the user "([^"]*)" exists$"#)]
    fn regex_patterns_match_whole_text(#[case] source: &str) {
        let pattern = StepPattern::regex(source).unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(pattern.kind(), PatternKind::Regex);
        assert_eq!(
            pattern.captures("the user \"Dave\" exists"),
            Some(vec!["Dave".to_owned()])
        );
        assert_eq!(pattern.captures("so the user \"Dave\" exists"), None);
    }

    #[test]
    fn alternation_stays_anchored() {
        let pattern = StepPattern::regex("cat|dog").unwrap_or_else(|err| panic!("{err}"));
        assert!(pattern.captures("dog").is_some());
        assert!(pattern.captures("hotdog").is_none());
    }

    #[test]
    fn rejects_invalid_sources() {
        assert!(StepPattern::new("broken {placeholder").is_err());
        assert!(StepPattern::regex("(unclosed").is_err());
    }
}
