//! Unit tests for the in-memory registry.

use rstest::{fixture, rstest};

use super::*;
use crate::pattern::PatternKind;

fn noop(_: &mut StepContext<'_>, _: &StepInput<'_>) -> Result<(), StepError> {
    Ok(())
}

#[fixture]
fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register(StepKeyword::Given, "the user {string} exists", noop)
        .and_then(|r| r.register(StepKeyword::When, "I pay {n:u32}", noop))
        .and_then(|r| r.register_regex(StepKeyword::When, r"I pay (\d+)(?: euros?)?", noop))
        .and_then(|r| r.register(StepKeyword::Then, "the user {string} exists", noop))
        .unwrap_or_else(|err| panic!("fixture patterns compile: {err}"));
    registry
}

#[rstest]
fn lookup_ignores_keywords(registry: Registry) {
    let matches = registry.find_definitions("the user \"Susan\" exists");
    let keywords: Vec<StepKeyword> = matches.iter().map(|m| m.definition().keyword()).collect();
    assert_eq!(keywords, [StepKeyword::Given, StepKeyword::Then]);
    assert!(matches.iter().all(|m| m.captures() == ["Susan"]));
}

#[rstest]
fn placeholder_and_regex_definitions_coexist(registry: Registry) {
    let matches = registry.find_definitions("I pay 5");
    let kinds: Vec<_> = matches
        .iter()
        .map(|m| m.definition().pattern().kind())
        .collect();
    assert_eq!(kinds, [PatternKind::Placeholder, PatternKind::Regex]);
    assert_eq!(registry.find_definitions("I pay 5 euros").len(), 1);
    assert!(registry.find_definitions("I pay five").is_empty());
}

#[test]
fn records_the_registration_site() {
    let mut registry = Registry::new();
    let line = line!() + 1;
    let registered = registry.register(StepKeyword::Given, "anything", noop);
    assert!(registered.is_ok());
    let definition = registry
        .definitions()
        .first()
        .unwrap_or_else(|| panic!("one definition"));
    assert_eq!(definition.file(), file!());
    assert_eq!(definition.line(), line);
}

#[test]
fn invalid_patterns_are_not_registered() {
    let mut registry = Registry::new();
    assert!(registry.register(StepKeyword::Given, "{broken", noop).is_err());
    assert!(registry.register_regex(StepKeyword::Given, "(", noop).is_err());
    assert!(registry.is_empty());
}

#[rstest]
fn groups_duplicate_patterns(registry: Registry) {
    let duplicates = registry.duplicate_patterns();
    assert_eq!(duplicates.len(), 1);
    let group = duplicates.first().unwrap_or_else(|| panic!("one group"));
    assert_eq!(
        group.iter().map(|d| d.keyword()).collect::<Vec<_>>(),
        [StepKeyword::Given, StepKeyword::Then]
    );
}

#[test]
fn placeholder_and_regex_with_same_text_are_distinct() {
    let mut registry = Registry::new();
    registry
        .register(StepKeyword::Given, "plain text", noop)
        .and_then(|r| r.register_regex(StepKeyword::Given, "plain text", noop))
        .unwrap_or_else(|err| panic!("{err}"));
    assert!(registry.duplicate_patterns().is_empty());
}

#[cfg(feature = "diagnostics")]
#[rstest]
fn dump_lists_definitions_in_order(registry: Registry) {
    let json = registry.dump().unwrap_or_else(|err| panic!("{err}"));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap_or_else(|err| panic!("{err}"));
    let definitions = value
        .get("definitions")
        .and_then(serde_json::Value::as_array)
        .unwrap_or_else(|| panic!("definitions array in {json}"));
    assert_eq!(definitions.len(), 4);
    let field = |index: usize, name: &str| {
        definitions
            .get(index)
            .and_then(|d| d.get(name))
            .cloned()
            .unwrap_or_default()
    };
    assert_eq!(field(0, "keyword"), "Given");
    assert_eq!(field(2, "kind"), "regex");
    assert_eq!(field(3, "shadowed").as_bool(), Some(true));
    assert_eq!(field(0, "shadowed").as_bool(), Some(false));
}
