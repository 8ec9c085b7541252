//! Step-pattern compilation.

mod compiler;
mod lexer;

use regex::Regex;

use crate::capture::extract_captures;
use crate::errors::PatternError;
use crate::hint::TypeHint;

/// A step pattern compiled to a regular expression.
///
/// Keeps the type hint of every capture group so that captured values can be
/// post-processed, for example to drop the quotes around `{string}` values.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    hints: Vec<TypeHint>,
}

impl CompiledPattern {
    /// Wrap a caller-supplied regular expression.
    ///
    /// Every capture group is treated as [`TypeHint::Any`], so values are
    /// returned exactly as matched.
    #[must_use]
    pub fn from_regex(regex: Regex) -> Self {
        let groups = regex.captures_len().saturating_sub(1);
        Self {
            regex,
            hints: vec![TypeHint::Any; groups],
        }
    }

    /// The underlying regular expression.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Type hints of the capture groups, in order.
    #[must_use]
    pub fn hints(&self) -> &[TypeHint] {
        &self.hints
    }

    /// Returns `true` when `text` matches the whole pattern.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Captured values when `text` matches, `None` otherwise.
    ///
    /// # Examples
    /// ```
    /// use nested_steps_patterns::compile_pattern;
    ///
    /// let pattern = compile_pattern("the user {string} has {n:u32} items")
    ///     .unwrap_or_else(|err| panic!("{err}"));
    /// let values = pattern.captures(r#"the user "Susan" has 3 items"#);
    /// assert_eq!(values, Some(vec!["Susan".to_string(), "3".to_string()]));
    /// ```
    #[must_use]
    pub fn captures(&self, text: &str) -> Option<Vec<String>> {
        let raw = extract_captures(&self.regex, text)?;
        Some(
            raw.into_iter()
                .enumerate()
                .map(|(index, value)| {
                    self.hints
                        .get(index)
                        .copied()
                        .unwrap_or_default()
                        .finish_capture(&value)
                })
                .collect(),
        )
    }
}

/// Build the anchored regex source for a step pattern.
///
/// # Errors
/// Returns [`PatternError`] when the pattern contains malformed placeholders
/// or unbalanced braces.
///
/// # Examples
/// ```
/// use nested_steps_patterns::build_regex_source;
///
/// assert_eq!(
///     build_regex_source("I have {n:u32} cukes").ok().as_deref(),
///     Some(r"^I have (\d+) cukes$"),
/// );
/// ```
pub fn build_regex_source(pattern: &str) -> Result<String, PatternError> {
    compiler::build(pattern).map(|(source, _)| source)
}

/// Build and compile a step pattern.
///
/// # Errors
/// Returns [`PatternError`] when placeholder parsing fails or the generated
/// regex cannot be compiled.
pub fn compile_pattern(pattern: &str) -> Result<CompiledPattern, PatternError> {
    let (source, hints) = compiler::build(pattern)?;
    let regex = Regex::new(&source)?;
    Ok(CompiledPattern { regex, hints })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled(pattern: &str) -> CompiledPattern {
        compile_pattern(pattern).unwrap_or_else(|err| panic!("pattern should compile: {err}"))
    }

    #[test]
    fn matches_whole_text_only() {
        let pattern = compiled("I am logged in");
        assert!(pattern.is_match("I am logged in"));
        assert!(!pattern.is_match("I am logged in as \"Susan\""));
    }

    #[test]
    fn strips_quotes_from_string_placeholders() {
        let pattern = compiled("I am logged in as {string}");
        assert_eq!(
            pattern.captures("I am logged in as 'Susan'"),
            Some(vec!["Susan".to_string()])
        );
    }

    #[test]
    fn raw_regex_captures_are_returned_verbatim() {
        let regex = Regex::new(r#"^the user "([^"]*)" exists$"#)
            .unwrap_or_else(|err| panic!("regex should compile: {err}"));
        let pattern = CompiledPattern::from_regex(regex);
        assert_eq!(pattern.hints(), &[TypeHint::Any]);
        assert_eq!(
            pattern.captures("the user \"Dave\" exists"),
            Some(vec!["Dave".to_string()])
        );
    }

    #[test]
    fn surfaces_regex_size_errors() {
        let heavy = format!("prefix {}", "{value:f64}".repeat(20_000));
        let Err(err) = compile_pattern(&heavy) else {
            panic!("pattern should be too large");
        };
        assert!(matches!(
            err,
            PatternError::Regex(regex::Error::CompiledTooBig(_))
        ));
    }
}
