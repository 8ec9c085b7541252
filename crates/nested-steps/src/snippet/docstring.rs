//! Fenced literal blocks.

use crate::argument::RawArgument;

const FENCES: [(&str, &str); 2] = [(r#"""""#, r#"\"\"\""#), ("```", r"\`\`\`")];

/// An opening fence and what it implies for the lines it encloses.
#[derive(Debug)]
pub(super) struct Fence {
    marker: &'static str,
    escaped: &'static str,
    indent: usize,
    content_type: Option<String>,
}

impl Fence {
    /// Recognise an opening fence such as `"""json`.
    pub(super) fn open(line: &str) -> Option<Self> {
        let body = line.trim_start();
        let indent = line.chars().count() - body.chars().count();
        FENCES.iter().find_map(|&(marker, escaped)| {
            let tag = body.strip_prefix(marker)?.trim();
            Some(Self {
                marker,
                escaped,
                indent,
                content_type: (!tag.is_empty()).then(|| tag.to_owned()),
            })
        })
    }

    pub(super) fn marker(&self) -> &'static str {
        self.marker
    }

    pub(super) fn closes(&self, line: &str) -> bool {
        line.trim() == self.marker
    }

    /// Strip up to the fence indentation and unescape embedded fences.
    pub(super) fn content_line(&self, line: &str) -> String {
        let mut skipped = 0;
        let body = line.trim_start_matches(|c: char| {
            let strip = skipped < self.indent && c.is_whitespace();
            if strip {
                skipped += 1;
            }
            strip
        });
        body.replace(self.escaped, self.marker)
    }

    /// Consume content lines up to the closing fence.
    ///
    /// Hands the fence back when the lines run out first.
    pub(super) fn read<'a>(self, lines: impl Iterator<Item = &'a str>) -> Result<RawArgument, Self> {
        let mut content = Vec::new();
        for line in lines {
            if self.closes(line) {
                return Ok(RawArgument::LiteralBlock {
                    content: content.join("\n"),
                    content_type: self.content_type,
                });
            }
            content.push(self.content_line(line));
        }
        Err(self)
    }
}
