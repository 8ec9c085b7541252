//! Convert lexed tokens into an anchored regular-expression source.

use crate::errors::PatternError;
use crate::hint::TypeHint;

use super::lexer::{Token, lex_pattern};

/// Build the anchored regex source for a step pattern.
///
/// Returns the source together with the type hint of each capture group, in
/// order.
pub(super) fn build(pattern: &str) -> Result<(String, Vec<TypeHint>), PatternError> {
    let tokens = lex_pattern(pattern)?;
    let mut source = String::with_capacity(pattern.len().saturating_mul(2).saturating_add(2));
    let mut hints = Vec::new();
    source.push('^');
    for token in tokens {
        match token {
            Token::Literal(text) => source.push_str(&regex::escape(&text)),
            Token::Placeholder { hint, .. } => {
                source.push_str(hint.capture_group());
                hints.push(hint);
            }
        }
    }
    source.push('$');
    Ok((source, hints))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(pattern: &str) -> String {
        match build(pattern) {
            Ok((source, _)) => source,
            Err(err) => panic!("pattern should compile: {err}"),
        }
    }

    #[test]
    fn escapes_literal_text() {
        assert_eq!(source("a (b) c?"), r"^a \(b\) c\?$");
    }

    #[test]
    fn emits_typed_groups() {
        assert_eq!(source("I have {count:u32} cukes"), r"^I have (\d+) cukes$");
    }

    #[test]
    fn records_hints_in_order() {
        let Ok((_, hints)) = build("{who:string} owes {amount:f64}") else {
            panic!("pattern should compile");
        };
        assert_eq!(hints, vec![TypeHint::Quoted, TypeHint::Float]);
    }
}
