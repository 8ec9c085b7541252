//! Pattern lexer splitting pattern text into literals and placeholders.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::errors::PatternError;
use crate::hint::TypeHint;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(String),
    Placeholder {
        start: usize,
        name: String,
        hint: TypeHint,
    },
}

struct Lexer<'a> {
    chars: Peekable<CharIndices<'a>>,
    tokens: Vec<Token>,
    literal: String,
    // Offsets of literal `{` still waiting for a partner.
    open_braces: Vec<usize>,
}

impl Lexer<'_> {
    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            self.tokens
                .push(Token::Literal(std::mem::take(&mut self.literal)));
        }
    }

    fn next_is(&mut self, expected: char) -> bool {
        self.chars.next_if(|&(_, c)| c == expected).is_some()
    }

    fn starts_placeholder(&mut self) -> bool {
        self.chars
            .peek()
            .is_some_and(|&(_, c)| c.is_ascii_alphabetic() || c == '_' || c == '}')
    }

    fn open_brace(&mut self, start: usize) -> Result<(), PatternError> {
        if self.next_is('{') {
            self.literal.push('{');
            return Ok(());
        }
        if self.starts_placeholder() {
            self.flush_literal();
            let token = self.placeholder(start)?;
            self.tokens.push(token);
            return Ok(());
        }
        self.open_braces.push(start);
        self.literal.push('{');
        Ok(())
    }

    fn close_brace(&mut self, position: usize) -> Result<(), PatternError> {
        if self.next_is('}') {
            self.literal.push('}');
            return Ok(());
        }
        if self.open_braces.pop().is_none() {
            return Err(PatternError::UnbalancedBrace {
                position,
                brace: '}',
            });
        }
        self.literal.push('}');
        Ok(())
    }

    fn placeholder(&mut self, start: usize) -> Result<Token, PatternError> {
        let mut name = String::new();
        while let Some((_, c)) = self
            .chars
            .next_if(|&(_, c)| c.is_ascii_alphanumeric() || c == '_')
        {
            name.push(c);
        }
        match self.chars.next() {
            Some((_, '}')) => {
                let hint = TypeHint::from_bare_name(&name).unwrap_or_default();
                Ok(Token::Placeholder { start, name, hint })
            }
            Some((_, ':')) => self.hinted_placeholder(start, name),
            Some(_) => Err(PatternError::InvalidPlaceholder {
                position: start,
                name,
            }),
            None => Err(PatternError::UnclosedPlaceholder {
                position: start,
                name,
            }),
        }
    }

    fn hinted_placeholder(&mut self, start: usize, name: String) -> Result<Token, PatternError> {
        let mut raw = String::new();
        loop {
            match self.chars.next() {
                Some((_, '}')) => break,
                Some((_, c)) => raw.push(c),
                None => {
                    return Err(PatternError::UnclosedPlaceholder {
                        position: start,
                        name,
                    });
                }
            }
        }
        if raw.is_empty() || raw.chars().any(|c| c.is_whitespace() || c == '{') {
            return Err(PatternError::InvalidPlaceholder {
                position: start,
                name,
            });
        }
        Ok(Token::Placeholder {
            start,
            name,
            hint: TypeHint::parse(Some(&raw)),
        })
    }

    fn run(mut self) -> Result<Vec<Token>, PatternError> {
        while let Some((index, c)) = self.chars.next() {
            match c {
                '\\' => {
                    let escaped = self.chars.next().map_or('\\', |(_, next)| next);
                    self.literal.push(escaped);
                }
                '{' => self.open_brace(index)?,
                '}' => self.close_brace(index)?,
                other => self.literal.push(other),
            }
        }
        if let Some(&position) = self.open_braces.first() {
            return Err(PatternError::UnbalancedBrace {
                position,
                brace: '{',
            });
        }
        self.flush_literal();
        Ok(self.tokens)
    }
}

pub(crate) fn lex_pattern(pattern: &str) -> Result<Vec<Token>, PatternError> {
    Lexer {
        chars: pattern.char_indices().peekable(),
        tokens: Vec::new(),
        literal: String::new(),
        open_braces: Vec::new(),
    }
    .run()
}
