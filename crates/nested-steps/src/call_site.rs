//! Source locations of dynamic step invocations.

use std::fmt;
use std::panic::Location;

/// Where a nested step was requested from.
///
/// Used only in diagnostics; it never influences matching or execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    /// Source file of the caller.
    pub file: &'static str,
    /// 1-based line of the caller.
    pub line: u32,
    /// 1-based column of the caller.
    pub column: u32,
}

impl CallSite {
    /// Capture the location of the nearest caller not marked
    /// `#[track_caller]`.
    ///
    /// # Examples
    /// ```
    /// use nested_steps::CallSite;
    ///
    /// let site = CallSite::caller();
    /// assert_eq!(site.line, line!() - 1);
    /// assert!(site.file.ends_with(".rs"));
    /// ```
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }
}

impl From<&Location<'static>> for CallSite {
    fn from(location: &Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn relay() -> CallSite {
        CallSite::caller()
    }

    #[test]
    fn track_caller_skips_annotated_frames() {
        let expected = line!() + 1;
        let site = relay();
        assert_eq!(site.line, expected);
        assert_eq!(site.file, file!());
    }

    #[test]
    fn displays_file_line_and_column() {
        let site = CallSite {
            file: "tests/login.rs",
            line: 12,
            column: 9,
        };
        assert_eq!(site.to_string(), "tests/login.rs:12:9");
    }
}
