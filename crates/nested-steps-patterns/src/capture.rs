//! Regex capture extraction.

use regex::Regex;

/// Capture groups of `re` when it matches `text`, `None` otherwise.
///
/// Group 0 is skipped. Optional groups that did not participate yield empty
/// strings so positions stay aligned with the pattern's placeholders.
///
/// # Examples
/// ```
/// # use regex::Regex;
/// # use nested_steps_patterns::extract_captures;
/// let regex = Regex::new(r"^(\d+)-(\w+)$").unwrap_or_else(|err| panic!("{err}"));
/// assert_eq!(
///     extract_captures(&regex, "42-answer"),
///     Some(vec!["42".to_string(), "answer".to_string()]),
/// );
/// assert!(extract_captures(&regex, "nope").is_none());
/// ```
#[must_use]
pub fn extract_captures(re: &Regex, text: &str) -> Option<Vec<String>> {
    let caps = re.captures(text)?;
    Some(
        caps.iter()
            .skip(1)
            .map(|group| group.map_or_else(String::new, |m| m.as_str().to_owned()))
            .collect(),
    )
}
