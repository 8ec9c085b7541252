//! Step arguments before and after normalisation.
//!
//! Snippets and DSL calls attach a [`RawArgument`]; step callbacks always see
//! a [`StepArgument`]. [`normalize`] is the single conversion between them.

use crate::table::Table;

/// A multi-line literal argument with an optional content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocString {
    /// The literal text, embedded newlines included.
    pub content: String,
    /// Content type declared on the opening fence, such as `json`.
    pub content_type: Option<String>,
}

impl DocString {
    /// Build a doc string with a content type.
    #[must_use]
    pub fn new(content: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: Some(content_type.into()),
        }
    }
}

/// An argument as written in a snippet or passed to [`StepContext::step_with`].
///
/// [`StepContext::step_with`]: crate::StepContext::step_with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawArgument {
    /// Rows of cells.
    Table {
        /// Rows in source order.
        rows: Vec<Vec<String>>,
    },
    /// A fenced block of literal text.
    LiteralBlock {
        /// Block content without the fences.
        content: String,
        /// Optional content type from the opening fence.
        content_type: Option<String>,
    },
}

impl From<&str> for RawArgument {
    fn from(content: &str) -> Self {
        Self::from(content.to_owned())
    }
}

impl From<String> for RawArgument {
    fn from(content: String) -> Self {
        Self::LiteralBlock {
            content,
            content_type: None,
        }
    }
}

impl From<DocString> for RawArgument {
    fn from(doc: DocString) -> Self {
        Self::LiteralBlock {
            content: doc.content,
            content_type: doc.content_type,
        }
    }
}

impl From<Table> for RawArgument {
    fn from(table: Table) -> Self {
        Self::Table {
            rows: table.into_rows(),
        }
    }
}

impl From<Vec<Vec<String>>> for RawArgument {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::Table { rows }
    }
}

/// The canonical argument handed to a step callback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StepArgument {
    /// Nothing was attached.
    #[default]
    None,
    /// A literal text block.
    DocString(DocString),
    /// A table.
    Table(Table),
}

impl StepArgument {
    /// The attached table, if any.
    #[must_use]
    pub fn table(&self) -> Option<&Table> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }

    /// The attached doc string, if any.
    #[must_use]
    pub fn docstring(&self) -> Option<&DocString> {
        match self {
            Self::DocString(doc) => Some(doc),
            _ => None,
        }
    }

    /// Returns `true` when nothing is attached.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Convert a raw argument into the value passed to callbacks.
///
/// Cells and text are moved across untouched, so the conversion cannot fail.
///
/// # Examples
/// ```
/// use nested_steps::{normalize, DocString, RawArgument, StepArgument};
///
/// let raw = RawArgument::LiteralBlock {
///     content: "Dear sir,\nYou've won a prize!\n".into(),
///     content_type: Some("text/plain".into()),
/// };
/// assert_eq!(
///     normalize(Some(raw)),
///     StepArgument::DocString(DocString::new("Dear sir,\nYou've won a prize!\n", "text/plain")),
/// );
/// assert_eq!(normalize(None), StepArgument::None);
/// ```
#[must_use]
pub fn normalize(raw: Option<RawArgument>) -> StepArgument {
    match raw {
        None => StepArgument::None,
        Some(RawArgument::Table { rows }) => StepArgument::Table(Table::new(rows)),
        Some(RawArgument::LiteralBlock {
            content,
            content_type,
        }) => StepArgument::DocString(DocString {
            content,
            content_type,
        }),
    }
}
