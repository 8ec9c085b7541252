//! Process-wide switches for nested step invocation.
//!
//! `NESTED_STEPS_STRICT_MATCHING` makes ambiguous invocations fail instead of
//! running the first registered match. `NESTED_STEPS_LANGUAGE` picks the
//! keyword dialect of snippets without a `# language:` header.

use std::sync::atomic::{AtomicU8, Ordering};

const STRICT_MATCHING_VAR: &str = "NESTED_STEPS_STRICT_MATCHING";
const LANGUAGE_VAR: &str = "NESTED_STEPS_LANGUAGE";
const FALLBACK_LANGUAGE: &str = "en";

const OVERRIDE_UNSET: u8 = 0;
const OVERRIDE_FALSE: u8 = 1;
const OVERRIDE_TRUE: u8 = 2;

static STRICT_MATCHING_OVERRIDE: AtomicU8 = AtomicU8::new(OVERRIDE_UNSET);

fn parse_env_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    let any_of = |words: [&str; 4]| words.iter().any(|word| value.eq_ignore_ascii_case(word));
    if any_of(["1", "true", "yes", "on"]) {
        Some(true)
    } else if any_of(["0", "false", "no", "off"]) {
        Some(false)
    } else {
        None
    }
}

fn env_strict_matching() -> Option<bool> {
    std::env::var(STRICT_MATCHING_VAR)
        .ok()
        .as_deref()
        .and_then(parse_env_bool)
}

fn strict_matching_override() -> Option<bool> {
    match STRICT_MATCHING_OVERRIDE.load(Ordering::Relaxed) {
        OVERRIDE_FALSE => Some(false),
        OVERRIDE_TRUE => Some(true),
        _ => None,
    }
}

/// Whether ambiguous invocations should be rejected by default.
#[must_use]
pub fn strict_matching() -> bool {
    strict_matching_override()
        .or_else(env_strict_matching)
        .unwrap_or(false)
}

/// Override strict matching for the current process.
pub fn set_strict_matching(enabled: bool) {
    let value = if enabled {
        OVERRIDE_TRUE
    } else {
        OVERRIDE_FALSE
    };
    STRICT_MATCHING_OVERRIDE.store(value, Ordering::Relaxed);
}

/// Return strict matching to the environment-driven default.
pub fn clear_strict_matching_override() {
    STRICT_MATCHING_OVERRIDE.store(OVERRIDE_UNSET, Ordering::Relaxed);
}

/// Language code for snippets without a `# language:` header.
#[must_use]
pub fn default_language() -> String {
    std::env::var(LANGUAGE_VAR)
        .ok()
        .map(|code| code.trim().to_owned())
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_owned())
}
