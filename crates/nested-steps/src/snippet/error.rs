//! Snippet parse failures.

use std::fmt;

use crate::localization::{message, message_with_args};

/// Why a snippet line was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// The line does not start with a step keyword.
    MissingKeyword,
    /// The keyword is not followed by any text.
    MissingStepText,
    /// A table row appears before any step.
    OrphanTable,
    /// A doc string appears before any step.
    OrphanDocString,
    /// A step already carries an argument.
    DuplicateArgument,
    /// A doc string is never closed.
    UnterminatedDocString {
        /// The opening fence.
        fence: String,
    },
    /// A table row is not delimited by `|` on both ends.
    UnterminatedRow,
    /// A table row differs in width from the first row.
    UnevenRow {
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        actual: usize,
    },
    /// The `# language:` header names an unsupported language.
    UnknownLanguage {
        /// The requested code.
        language: String,
    },
    /// An external grammar rejected the snippet.
    Grammar {
        /// Grammar-specific description.
        details: String,
    },
}

impl ParseErrorKind {
    fn reason(&self) -> String {
        match self {
            Self::MissingKeyword => message("snippet-missing-keyword"),
            Self::MissingStepText => message("snippet-missing-text"),
            Self::OrphanTable => message("snippet-orphan-table"),
            Self::OrphanDocString => message("snippet-orphan-docstring"),
            Self::DuplicateArgument => message("snippet-duplicate-argument"),
            Self::UnterminatedDocString { fence } => {
                message_with_args("snippet-unterminated-docstring", |args| {
                    args.set("fence", fence.clone());
                })
            }
            Self::UnterminatedRow => message("snippet-unterminated-row"),
            Self::UnevenRow { expected, actual } => {
                message_with_args("snippet-uneven-row", |args| {
                    args.set("expected", expected.to_string());
                    args.set("actual", actual.to_string());
                })
            }
            Self::UnknownLanguage { language } => {
                message_with_args("snippet-unknown-language", |args| {
                    args.set("language", language.clone());
                })
            }
            Self::Grammar { details } => message_with_args("snippet-grammar", |args| {
                args.set("details", details.clone());
            }),
        }
    }
}

/// A snippet could not be turned into step records.
///
/// Nothing from the snippet runs when parsing fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetParseError {
    /// 1-based line within the snippet.
    pub line_number: usize,
    /// The offending line, trimmed.
    pub line: String,
    /// What was wrong with it.
    pub kind: ParseErrorKind,
}

impl SnippetParseError {
    pub(crate) fn new(line_number: usize, line: &str, kind: ParseErrorKind) -> Self {
        Self {
            line_number,
            line: line.trim().to_owned(),
            kind,
        }
    }
}

impl fmt::Display for SnippetParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = message_with_args("snippet-parse-error", |args| {
            args.set("line_number", self.line_number.to_string());
            args.set("line", self.line.clone());
            args.set("reason", self.kind.reason());
        });
        f.write_str(&rendered)
    }
}

impl std::error::Error for SnippetParseError {}
