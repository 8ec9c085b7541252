//! Step keyword and step-pattern utilities for `nested-steps`.
//!
//! The crate turns human-friendly step patterns such as
//! `the user {string} has {count:u32} items` into anchored regular expressions
//! and extracts the captured values from matching step text. It also owns the
//! [`StepKeyword`] type shared by the snippet parsers.

mod capture;
mod errors;
mod hint;
mod keyword;
mod pattern;

pub use capture::extract_captures;
pub use errors::PatternError;
pub use hint::TypeHint;
pub use keyword::{StepKeyword, StepKeywordParseError, UnsupportedStepType};
pub use pattern::{CompiledPattern, build_regex_source, compile_pattern};
