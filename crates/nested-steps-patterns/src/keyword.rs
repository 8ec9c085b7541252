//! The step keyword type shared by snippet parsers and registries.
//!
//! Keywords are diagnostic metadata for nested invocations: a step registered
//! as `Given` can be invoked from a `Then` line. Parsers still record the
//! keyword so that messages and registry dumps read naturally.

use gherkin::StepType;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Keyword a step line or step definition was written with.
///
/// The bullet keyword `*` parses as [`And`](Self::And).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKeyword {
    /// Setup preconditions.
    Given,
    /// Perform an action.
    When,
    /// Assert an outcome.
    Then,
    /// Continue the previous keyword.
    And,
    /// Contrast with the previous keyword.
    But,
}

impl StepKeyword {
    /// Return the canonical English spelling.
    ///
    /// # Examples
    ///
    /// ```
    /// use nested_steps_patterns::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::But.as_str(), "But");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text that names no keyword.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid step keyword: {0}")]
pub struct StepKeywordParseError(pub String);

impl FromStr for StepKeyword {
    type Err = StepKeywordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        [
            ("given", Self::Given),
            ("when", Self::When),
            ("then", Self::Then),
            ("and", Self::And),
            ("but", Self::But),
            ("*", Self::And),
        ]
        .into_iter()
        .find_map(|(name, keyword)| trimmed.eq_ignore_ascii_case(name).then_some(keyword))
        .ok_or_else(|| StepKeywordParseError(trimmed.to_owned()))
    }
}

/// A Gherkin [`StepType`] with no keyword counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported step type: {0:?}")]
pub struct UnsupportedStepType(pub StepType);

impl TryFrom<StepType> for StepKeyword {
    type Error = UnsupportedStepType;

    fn try_from(ty: StepType) -> Result<Self, Self::Error> {
        match ty {
            StepType::Given => Ok(Self::Given),
            StepType::When => Ok(Self::When),
            StepType::Then => Ok(Self::Then),
            #[expect(unreachable_patterns, reason = "guard future StepType variants")]
            other => Err(UnsupportedStepType(other)),
        }
    }
}
