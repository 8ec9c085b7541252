//! Placeholder type hints and their regular-expression fragments.

/// The shape of value a placeholder accepts.
///
/// Rust primitive names (`u32`, `i64`, `f64`, ...) and the Cucumber
/// expression names (`int`, `float`, `word`, `string`) are both understood.
/// Anything else matches lazily.
///
/// # Examples
/// ```
/// use nested_steps_patterns::TypeHint;
///
/// assert_eq!(TypeHint::parse(Some("u8")), TypeHint::Unsigned);
/// assert_eq!(TypeHint::parse(Some("string")), TypeHint::Quoted);
/// assert_eq!(TypeHint::parse(None), TypeHint::Any);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeHint {
    /// Unsigned decimal integer.
    Unsigned,
    /// Optionally signed decimal integer.
    Signed,
    /// Decimal or scientific float, plus `NaN` and infinities.
    Float,
    /// A single run of non-whitespace characters.
    Word,
    /// A double- or single-quoted string; the quotes are not captured.
    Quoted,
    /// Any non-empty text, matched lazily.
    #[default]
    Any,
}

impl TypeHint {
    /// Resolve a textual hint.
    #[must_use]
    pub fn parse(hint: Option<&str>) -> Self {
        match hint {
            Some("u8" | "u16" | "u32" | "u64" | "u128" | "usize") => Self::Unsigned,
            Some("i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "int") => Self::Signed,
            Some("f32" | "f64" | "float") => Self::Float,
            Some("word") => Self::Word,
            Some("string") => Self::Quoted,
            _ => Self::Any,
        }
    }

    /// Hint implied by a bare placeholder name such as `{int}`.
    ///
    /// Returns `None` for names that do not denote a Cucumber expression type.
    #[must_use]
    pub fn from_bare_name(name: &str) -> Option<Self> {
        match name {
            "int" | "float" | "word" | "string" => Some(Self::parse(Some(name))),
            _ => None,
        }
    }

    /// Capturing group emitted for a placeholder of this type.
    #[must_use]
    pub fn capture_group(self) -> &'static str {
        match self {
            Self::Unsigned => r"(\d+)",
            Self::Signed => r"([+-]?\d+)",
            Self::Float => {
                r"((?i:[+-]?(?:\d+\.\d*|\.\d+|\d+)(?:e[+-]?\d+)?|nan|[+-]?inf(?:inity)?))"
            }
            Self::Word => r"(\S+)",
            Self::Quoted => r#"("[^"]*"|'[^']*')"#,
            Self::Any => r"(.+?)",
        }
    }

    /// Post-process a raw capture for this type.
    ///
    /// Quoted captures lose their surrounding quotes; all other values are
    /// returned unchanged.
    #[must_use]
    pub fn finish_capture(self, raw: &str) -> String {
        if self != Self::Quoted {
            return raw.to_owned();
        }
        raw.strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .or_else(|| {
                raw.strip_prefix('\'')
                    .and_then(|rest| rest.strip_suffix('\''))
            })
            .unwrap_or(raw)
            .to_owned()
    }
}
