//! Snippet parsing through the full Gherkin grammar.

use gherkin::GherkinEnv;
use log::debug;
use nested_steps_patterns::StepKeyword;

use super::docstring::Fence;
use super::{InvocationRecord, ParseErrorKind, SnippetGrammar, SnippetParseError};
use crate::argument::RawArgument;

const PREAMBLE: &str = "Feature: nested steps\n  Scenario: nested steps\n";
const PREAMBLE_LINES: usize = 2;
const INDENT: &str = "    ";

/// Parses snippets with the `gherkin` crate by wrapping them in a synthetic
/// feature and scenario.
///
/// Keywords are English. Doc strings are read back from the snippet's own
/// fence lines, so content and content type come out exactly as
/// [`SnippetParser`](super::SnippetParser) reports them.
///
/// # Examples
/// ```
/// use nested_steps::{GherkinGrammar, SnippetGrammar};
///
/// let records = GherkinGrammar
///     .parse("Given a user\n  | name |\n  | Susan |\nThen it works")
///     .unwrap_or_else(|err| panic!("{err}"));
/// assert_eq!(records.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GherkinGrammar;

impl SnippetGrammar for GherkinGrammar {
    fn parse(&self, snippet: &str) -> Result<Vec<InvocationRecord>, SnippetParseError> {
        let mut source = String::from(PREAMBLE);
        for line in snippet.lines() {
            source.push_str(INDENT);
            source.push_str(line);
            source.push('\n');
        }

        let feature = gherkin::Feature::parse(source.as_str(), GherkinEnv::default())
            .map_err(|error| {
                let details = error.to_string();
                let line_number = reported_line(&details);
                grammar_error(snippet, line_number, ParseErrorKind::Grammar { details })
            })?;
        let steps = feature
            .scenarios
            .into_iter()
            .flat_map(|scenario| scenario.steps);

        let mut records = Vec::new();
        for step in steps {
            let line_number = snippet_line(&source, step.span.start);
            let keyword = step
                .keyword
                .trim()
                .parse::<StepKeyword>()
                .or_else(|_| StepKeyword::try_from(step.ty))
                .map_err(|error| {
                    grammar_error(
                        snippet,
                        Some(line_number),
                        ParseErrorKind::Grammar {
                            details: error.to_string(),
                        },
                    )
                })?;
            let raw_argument = match (step.table, step.docstring) {
                (Some(_), Some(_)) => {
                    return Err(grammar_error(
                        snippet,
                        Some(line_number),
                        ParseErrorKind::DuplicateArgument,
                    ));
                }
                (Some(table), None) => Some(RawArgument::Table { rows: table.rows }),
                (None, Some(docstring)) => Some(
                    literal_block(snippet, line_number)
                        .unwrap_or_else(|| tagged_docstring(&docstring)),
                ),
                (None, None) => None,
            };
            records.push(InvocationRecord {
                text: step.value,
                raw_argument,
                line_number,
                keyword,
            });
        }
        debug!("gherkin grammar parsed {} step(s) from snippet", records.len());
        Ok(records)
    }
}

fn snippet_line(source: &str, offset: usize) -> usize {
    let preceding = source
        .char_indices()
        .take_while(|&(index, _)| index < offset)
        .filter(|&(_, c)| c == '\n')
        .count();
    preceding.saturating_sub(PREAMBLE_LINES) + 1
}

/// Read the fenced block following the step on `step_line` straight from the
/// snippet.
fn literal_block(snippet: &str, step_line: usize) -> Option<RawArgument> {
    let mut lines = snippet.lines().skip(step_line);
    let fence = loop {
        let line = lines.next()?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        break Fence::open(line)?;
    };
    fence.read(lines).ok()
}

/// `gherkin` keeps the fence tag as the first docstring line.
fn tagged_docstring(docstring: &str) -> RawArgument {
    let (tag, body) = docstring.split_once('\n').unwrap_or((docstring, ""));
    let tag = tag.trim();
    RawArgument::LiteralBlock {
        content: body.trim_end_matches('\n').to_owned(),
        content_type: (!tag.is_empty()).then(|| tag.to_owned()),
    }
}

/// Source line from a `gherkin` message of the form `Error at L:C: ...`.
fn reported_line(details: &str) -> Option<usize> {
    let (line, _) = details.strip_prefix("Error at ")?.split_once(':')?;
    line.parse::<usize>()
        .ok()?
        .checked_sub(PREAMBLE_LINES)
        .filter(|&line| line > 0)
}

fn grammar_error(
    snippet: &str,
    line_number: Option<usize>,
    kind: ParseErrorKind,
) -> SnippetParseError {
    let lines: Vec<&str> = snippet.lines().collect();
    let located = line_number.and_then(|number| {
        let number = number.min(lines.len());
        let line = lines.get(number.checked_sub(1)?)?;
        Some((number, *line))
    });
    let (line_number, line) = located.unwrap_or_else(|| {
        lines
            .iter()
            .enumerate()
            .find(|(_, line)| !line.trim().is_empty())
            .map_or((1, ""), |(index, line)| (index + 1, *line))
    });
    SnippetParseError::new(line_number, line, kind)
}
