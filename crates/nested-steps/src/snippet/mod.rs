//! Turning multi-line snippets into ordered step records.
//!
//! [`SnippetParser`] understands a deliberately small dialect: keyword lines,
//! pipe-delimited tables and fenced doc strings, plus comments and an optional
//! `# language:` header. [`GherkinGrammar`] delegates to the full Gherkin
//! grammar instead. Both sit behind [`SnippetGrammar`] so the invoker does not
//! care which one it uses.

mod dialect;
mod docstring;
mod error;
mod gherkin_adapter;

use std::sync::LazyLock;

use log::{debug, warn};
use nested_steps_patterns::StepKeyword;

use crate::argument::RawArgument;
use crate::config;
use crate::table::parse_row;

pub use dialect::Dialect;
use docstring::Fence;
pub use error::{ParseErrorKind, SnippetParseError};
pub use gherkin_adapter::GherkinGrammar;

/// One step line of a snippet together with its attached argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRecord {
    /// Step text with the keyword removed.
    pub text: String,
    /// Table or doc string written under the step.
    pub raw_argument: Option<RawArgument>,
    /// 1-based line of the step within the snippet.
    pub line_number: usize,
    /// Keyword the step was written with. Matching ignores it.
    pub keyword: StepKeyword,
}

/// Grammar used to split snippets into records.
pub trait SnippetGrammar {
    /// Parse `snippet` into records in source order.
    ///
    /// # Errors
    ///
    /// Returns [`SnippetParseError`] for the first malformed line; no partial
    /// result is produced.
    fn parse(&self, snippet: &str) -> Result<Vec<InvocationRecord>, SnippetParseError>;
}

/// The built-in line-oriented snippet grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetParser {
    dialect: &'static Dialect,
}

static CONFIGURED: LazyLock<SnippetParser> = LazyLock::new(|| {
    let code = config::default_language();
    SnippetParser::for_language(&code).unwrap_or_else(|| {
        warn!("unknown default snippet language {code:?}; using English");
        SnippetParser::english()
    })
});

impl SnippetParser {
    /// A parser for English keywords.
    #[must_use]
    pub const fn english() -> Self {
        Self {
            dialect: Dialect::english(),
        }
    }

    /// A parser whose default dialect is `code`, if supported.
    #[must_use]
    pub fn for_language(code: &str) -> Option<Self> {
        Dialect::for_language(code).map(|dialect| Self { dialect })
    }

    /// The process-wide parser for the configured default language.
    #[must_use]
    pub fn configured() -> &'static Self {
        &CONFIGURED
    }

    /// Dialect used when a snippet has no `# language:` header.
    #[must_use]
    pub fn dialect(&self) -> &'static Dialect {
        self.dialect
    }
}

impl Default for SnippetParser {
    fn default() -> Self {
        *Self::configured()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Previous {
    Nothing,
    Step,
    Row,
    Block,
}

impl SnippetGrammar for SnippetParser {
    fn parse(&self, snippet: &str) -> Result<Vec<InvocationRecord>, SnippetParseError> {
        let mut dialect = self.dialect;
        let mut records: Vec<InvocationRecord> = Vec::new();
        let mut previous = Previous::Nothing;
        let mut lines = snippet.lines().enumerate().map(|(index, line)| (index + 1, line));

        while let Some((number, line)) = lines.next() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(comment) = trimmed.strip_prefix('#') {
                if records.is_empty() {
                    if let Some(code) = language_header(comment) {
                        dialect = Dialect::for_language(code).ok_or_else(|| {
                            SnippetParseError::new(
                                number,
                                line,
                                ParseErrorKind::UnknownLanguage {
                                    language: code.to_owned(),
                                },
                            )
                        })?;
                    }
                }
                continue;
            }

            let fail = |kind| SnippetParseError::new(number, line, kind);

            if trimmed.starts_with('|') {
                let rows = attach_target(&mut records, previous, ParseErrorKind::OrphanTable)
                    .map_err(fail)?;
                let cells = parse_row(trimmed).ok_or_else(|| fail(ParseErrorKind::UnterminatedRow))?;
                push_row(rows, cells).map_err(fail)?;
                previous = Previous::Row;
                continue;
            }

            if let Some(fence) = Fence::open(line) {
                let record = match previous {
                    Previous::Step => records.last_mut(),
                    Previous::Nothing => None,
                    Previous::Row | Previous::Block => {
                        return Err(fail(ParseErrorKind::DuplicateArgument));
                    }
                }
                .ok_or_else(|| fail(ParseErrorKind::OrphanDocString))?;
                let block = fence
                    .read(lines.by_ref().map(|(_, inner)| inner))
                    .map_err(|fence| {
                        fail(ParseErrorKind::UnterminatedDocString {
                            fence: fence.marker().to_owned(),
                        })
                    })?;
                record.raw_argument = Some(block);
                previous = Previous::Block;
                continue;
            }

            let (keyword, rest) = dialect
                .split_keyword(trimmed)
                .ok_or_else(|| fail(ParseErrorKind::MissingKeyword))?;
            let text = rest.trim();
            if text.is_empty() {
                return Err(fail(ParseErrorKind::MissingStepText));
            }
            records.push(InvocationRecord {
                text: text.to_owned(),
                raw_argument: None,
                line_number: number,
                keyword,
            });
            previous = Previous::Step;
        }

        debug!(
            "parsed {} step(s) from snippet using dialect {}",
            records.len(),
            dialect.code()
        );
        Ok(records)
    }
}

fn language_header(comment: &str) -> Option<&str> {
    let (key, value) = comment.split_once(':')?;
    let value = value.trim();
    (key.trim() == "language" && !value.is_empty()).then_some(value)
}

/// Rows of the table a new row should join, starting one if needed.
fn attach_target(
    records: &mut [InvocationRecord],
    previous: Previous,
    orphan: ParseErrorKind,
) -> Result<&mut Vec<Vec<String>>, ParseErrorKind> {
    let record = match previous {
        Previous::Nothing => return Err(orphan),
        Previous::Block => return Err(ParseErrorKind::DuplicateArgument),
        Previous::Step | Previous::Row => records.last_mut().ok_or(orphan)?,
    };
    let argument = record
        .raw_argument
        .get_or_insert_with(|| RawArgument::Table { rows: Vec::new() });
    match argument {
        RawArgument::Table { rows } => Ok(rows),
        RawArgument::LiteralBlock { .. } => Err(ParseErrorKind::DuplicateArgument),
    }
}

fn push_row(rows: &mut Vec<Vec<String>>, cells: Vec<String>) -> Result<(), ParseErrorKind> {
    if let Some(first) = rows.first().filter(|first| first.len() != cells.len()) {
        return Err(ParseErrorKind::UnevenRow {
            expected: first.len(),
            actual: cells.len(),
        });
    }
    rows.push(cells);
    Ok(())
}
