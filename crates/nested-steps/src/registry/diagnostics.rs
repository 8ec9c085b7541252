//! JSON export of registry contents for tooling.

use serde::Serialize;

use super::Registry;
use crate::pattern::PatternKind;

#[derive(Serialize)]
struct DumpedDefinition<'r> {
    keyword: &'static str,
    pattern: &'r str,
    kind: &'static str,
    file: &'static str,
    line: u32,
    shadowed: bool,
}

#[derive(Serialize)]
struct RegistryDump<'r> {
    definitions: Vec<DumpedDefinition<'r>>,
}

impl Registry {
    /// Serialise every definition, in registration order, to JSON.
    ///
    /// A definition is `shadowed` when an earlier one has the same pattern.
    ///
    /// # Errors
    ///
    /// Returns any error raised by `serde_json`.
    pub fn dump(&self) -> serde_json::Result<String> {
        let definitions = self
            .definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| DumpedDefinition {
                keyword: definition.keyword.as_str(),
                pattern: definition.pattern.as_str(),
                kind: match definition.pattern.kind() {
                    PatternKind::Placeholder => "placeholder",
                    PatternKind::Regex => "regex",
                },
                file: definition.file,
                line: definition.line,
                shadowed: self
                    .definitions
                    .iter()
                    .take(index)
                    .any(|earlier| earlier.pattern == definition.pattern),
            })
            .collect();
        serde_json::to_string(&RegistryDump { definitions })
    }
}
