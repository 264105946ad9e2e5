//! The style registry: loading, document overrides, and resolution.
//!
//! Bulk loading and document updates have opposite precedence. [`StyleRegistry::load`]
//! keeps the first definition of a name and ignores later ones, so one library
//! file cannot silently override another. [`StyleRegistry::update`] lets the
//! later definition win field by field, so a document can adjust the library
//! styles it uses.

use std::collections::HashMap;

use panache_common::constants::STYLEDEF_KEY;
use panache_common::error::{PanacheError, Result};
use serde_yaml::Value;

use crate::definition::{StyleDefinition, scalar_to_string};
use crate::resolved::ResolvedStyle;
use crate::source::StyleSource;

/// Outcome counters of a [`StyleRegistry::load`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Definitions inserted.
    pub added: usize,
    /// Definitions ignored because their name was already known.
    pub duplicates: usize,
    /// Sources skipped because they failed to read or parse.
    pub skipped_sources: usize,
    /// Individual definitions skipped because they were invalid.
    pub invalid: usize,
}

/// All known style definitions of one resolution session.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    styles: HashMap<String, StyleDefinition>,
}

impl StyleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of known styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Returns `true` if no style is known.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Looks up a definition by name.
    pub fn get(&self, name: &str) -> Option<&StyleDefinition> {
        self.styles.get(name)
    }

    /// Returns `true` if `name` is a known style.
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Iterates over all definitions in name order.
    pub fn definitions(&self) -> impl Iterator<Item = &StyleDefinition> {
        let mut defs: Vec<_> = self.styles.values().collect();
        defs.sort_by(|a, b| a.name().cmp(b.name()));
        defs.into_iter()
    }

    /// Loads definitions from ordered sources. The first definition of a
    /// name wins; later ones are logged and discarded.
    ///
    /// Sources that failed to parse, and sources without a `styledef_`
    /// section, are skipped. Loading never fails as a whole.
    pub fn load<I>(&mut self, sources: I) -> LoadReport
    where
        I: IntoIterator<Item = StyleSource>,
    {
        let mut report = LoadReport::default();

        for source in sources {
            let document = match source.document {
                Ok(document) => document,
                Err(e) => {
                    tracing::warn!(source = %source.label, error = %e, "skipping style source");
                    report.skipped_sources += 1;
                    continue;
                }
            };

            for (name, data) in styledefs(&document) {
                let style = match StyleDefinition::from_yaml(name, data, source.label.as_str()) {
                    Ok(style) => style,
                    Err(e) => {
                        tracing::warn!(source = %source.label, error = %e, "skipping style definition");
                        report.invalid += 1;
                        continue;
                    }
                };

                if self.styles.contains_key(style.name()) {
                    tracing::warn!(
                        style = %style.name(),
                        source = %source.label,
                        "ignoring duplicate style definition"
                    );
                    report.duplicates += 1;
                } else {
                    tracing::info!(style = %style.name(), source = %source.label, "adding style");
                    let _ = self.styles.insert(style.name().to_owned(), style);
                    report.added += 1;
                }
            }
        }

        report
    }

    /// Merges one definition into the registry, the update winning.
    ///
    /// A new name is inserted as-is. For a known name the parent is replaced
    /// (even by none), options and metadata are shallow-merged, and filter
    /// lists are appended.
    pub fn update(&mut self, update: StyleDefinition) {
        if let Some(style) = self.styles.get_mut(update.name()) {
            tracing::info!(style = %update.name(), source = %update.source(), "merging style");
            style.merge(update);
        } else {
            tracing::info!(style = %update.name(), source = %update.source(), "adding style");
            let _ = self.styles.insert(update.name().to_owned(), update);
        }
    }

    /// Applies [`Self::update`] for every definition under the `styledef_`
    /// key of a document, in document order.
    ///
    /// Returns the number of definitions applied. Invalid definitions are
    /// logged and skipped.
    pub fn update_from_document(&mut self, label: &str, document: &Value) -> usize {
        let mut applied = 0;
        for (name, data) in styledefs(document) {
            match StyleDefinition::from_yaml(name, data, label) {
                Ok(style) => {
                    self.update(style);
                    applied += 1;
                }
                Err(e) => {
                    tracing::warn!(source = %label, error = %e, "skipping style definition");
                }
            }
        }
        applied
    }

    /// Flattens a style and its ancestors into one parameter set.
    ///
    /// An absent or empty name, or an unknown style, resolves to the empty
    /// parameter set. A missing parent ends the chain the same way.
    ///
    /// # Errors
    ///
    /// Returns [`PanacheError::CyclicInheritance`] if the parent chain of
    /// `name` loops.
    pub fn resolve(&self, name: Option<&str>) -> Result<ResolvedStyle> {
        let mut chain = Vec::new();
        self.resolve_chain(name, &mut chain)
    }

    fn resolve_chain(&self, name: Option<&str>, chain: &mut Vec<String>) -> Result<ResolvedStyle> {
        let Some(name) = name.filter(|n| !n.is_empty()) else {
            return Ok(ResolvedStyle::default());
        };

        if chain.iter().any(|seen| seen == name) {
            chain.push(name.to_owned());
            return Err(PanacheError::CyclicInheritance {
                chain: std::mem::take(chain),
            });
        }

        let Some(style) = self.styles.get(name) else {
            tracing::warn!(style = %name, "unknown style");
            return Ok(ResolvedStyle::default());
        };

        tracing::debug!(style = %name, parent = ?style.parent(), "resolving style");
        chain.push(name.to_owned());
        let parent = self.resolve_chain(style.parent(), chain)?;
        let _ = chain.pop();

        Ok(parent.inherit(style))
    }
}

/// Yields `(name, record)` pairs of a document's `styledef_` section.
///
/// Documents without the section, or with a non-mapping section, yield
/// nothing. Entries whose key is not a scalar are skipped.
fn styledefs(document: &Value) -> Vec<(String, Option<&Value>)> {
    let Some(section) = document.get(STYLEDEF_KEY) else {
        return Vec::new();
    };
    let Some(section) = section.as_mapping() else {
        if !section.is_null() {
            tracing::debug!("ignoring non-mapping style definition section");
        }
        return Vec::new();
    };
    section
        .iter()
        .filter_map(|(name, data)| scalar_to_string(name).map(|name| (name, Some(data))))
        .collect()
}

#[cfg(test)]
mod tests {
    use panache_common::types::OptionValue;

    use super::*;

    fn source(label: &str, text: &str) -> StyleSource {
        StyleSource::parse(label, text)
    }

    fn style(name: &str) -> StyleDefinition {
        StyleDefinition::new(name, "test").expect("valid name")
    }

    #[test]
    fn load_adds_definitions() {
        let mut registry = StyleRegistry::new();
        let report = registry.load([source(
            "lib.yaml",
            "styledef_:\n  base:\n    commandline: {toc: true}\n  wiki:\n    parent: base\n",
        )]);
        assert_eq!(report.added, 2);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("wiki").and_then(StyleDefinition::parent), Some("base"));
        assert_eq!(registry.get("base").map(StyleDefinition::source), Some("lib.yaml"));
    }

    #[test]
    fn load_first_definition_wins() {
        let mut registry = StyleRegistry::new();
        let report = registry.load([
            source("a.yaml", "styledef_:\n  s:\n    metadata: {lang: en}\n"),
            source("b.yaml", "styledef_:\n  s:\n    metadata: {lang: de}\n"),
        ]);
        assert_eq!(report.added, 1);
        assert_eq!(report.duplicates, 1);
        let s = registry.get("s").expect("s loaded");
        assert_eq!(s.metadata()["lang"], Value::from("en"));
        assert_eq!(s.source(), "a.yaml");
    }

    #[test]
    fn load_skips_malformed_and_unrelated_sources() {
        let mut registry = StyleRegistry::new();
        let report = registry.load([
            source("bad.yaml", "styledef_: ["),
            source("other.yaml", "title: not styles"),
            source("empty.yaml", ""),
            source("null-section.yaml", "styledef_:"),
            source("good.yaml", "styledef_:\n  ok: {}\n"),
        ]);
        assert_eq!(report.skipped_sources, 1);
        assert_eq!(report.added, 1);
        assert!(registry.contains("ok"));
    }

    #[test]
    fn load_skips_empty_style_name() {
        let mut registry = StyleRegistry::new();
        let report = registry.load([source("lib.yaml", "styledef_:\n  '': {}\n  ok: {}\n")]);
        assert_eq!(report.invalid, 1);
        assert_eq!(report.added, 1);
    }

    #[test]
    fn update_inserts_new_style() {
        let mut registry = StyleRegistry::new();
        registry.update(style("new").with_option("toc", true));
        assert!(registry.contains("new"));
    }

    #[test]
    fn update_merges_last_wins() {
        let mut registry = StyleRegistry::new();
        registry.update(
            style("s")
                .with_parent("base")
                .with_option("toc", true)
                .with_option("to", "html")
                .with_metadata("lang", "en")
                .with_run(["f1"])
                .with_kill(["k1"]),
        );
        registry.update(
            style("s")
                .with_option("to", "html5")
                .with_metadata("author", "me")
                .with_run(["f1", "f2"])
                .with_kill(["k2"]),
        );

        let s = registry.get("s").expect("s present");
        assert!(s.parent().is_none(), "parent is always overwritten");
        assert_eq!(s.commandline()["toc"], OptionValue::Switch(true));
        assert_eq!(s.commandline()["to"], OptionValue::Value("html5".into()));
        assert_eq!(s.metadata()["lang"], Value::from("en"));
        assert_eq!(s.metadata()["author"], Value::from("me"));
        assert_eq!(s.filters_run(), ["f1", "f1", "f2"]);
        assert_eq!(s.filters_kill(), ["k1", "k2"]);
    }

    #[test]
    fn update_from_document_applies_each_definition() {
        let mut registry = StyleRegistry::new();
        let _ = registry.load([source(
            "lib.yaml",
            "styledef_:\n  wiki:\n    metadata: {lang: en}\n",
        )]);
        let doc: Value = serde_yaml::from_str(
            "styledef_:\n  wiki:\n    metadata: {lang: it}\n  local:\n    parent: wiki\n",
        )
        .expect("yaml");

        let applied = registry.update_from_document("doc.md", &doc);
        assert_eq!(applied, 2);
        assert_eq!(
            registry.get("wiki").expect("wiki").metadata()["lang"],
            Value::from("it")
        );
        assert_eq!(registry.get("local").map(StyleDefinition::source), Some("doc.md"));
    }

    #[test]
    fn resolve_empty_name_is_identity() {
        let mut registry = StyleRegistry::new();
        registry.update(style("s").with_option("toc", true));
        assert!(registry.resolve(None).expect("resolves").is_empty());
        assert!(registry.resolve(Some("")).expect("resolves").is_empty());
    }

    #[test]
    fn resolve_unknown_is_identity() {
        let registry = StyleRegistry::new();
        assert_eq!(
            registry.resolve(Some("ghost")).expect("resolves"),
            ResolvedStyle::default()
        );
    }

    #[test]
    fn resolve_parentless_is_own_fields() {
        let mut registry = StyleRegistry::new();
        registry.update(
            style("solo")
                .with_option("toc", true)
                .with_metadata("lang", "en")
                .with_run(["a", "b"]),
        );
        let resolved = registry.resolve(Some("solo")).expect("resolves");
        let solo = registry.get("solo").expect("solo defined");
        assert_eq!(&resolved.commandline, solo.commandline());
        assert_eq!(&resolved.metadata, solo.metadata());
        assert_eq!(resolved.filters, solo.filters_run());
    }

    #[test]
    fn resolve_inherits_from_numeric_style_name() {
        let mut registry = StyleRegistry::new();
        let _ = registry.load([source(
            "lib.yaml",
            "styledef_:\n  2019:\n    filter: {run: [old]}\n  child:\n    parent: 2019\n    filter: {run: [new]}\n",
        )]);
        assert_eq!(registry.get("child").and_then(StyleDefinition::parent), Some("2019"));
        let resolved = registry.resolve(Some("child")).expect("resolves");
        assert_eq!(resolved.filters, vec!["old", "new"]);
    }

    #[test]
    fn resolve_child_overrides_parent_metadata() {
        let mut registry = StyleRegistry::new();
        registry.update(style("base").with_option("toc", true).with_metadata("lang", "en"));
        registry.update(style("child").with_parent("base").with_metadata("lang", "it"));

        let resolved = registry.resolve(Some("child")).expect("resolves");
        assert_eq!(resolved.commandline["toc"], OptionValue::Switch(true));
        assert_eq!(resolved.metadata["lang"], Value::from("it"));
        assert!(resolved.filters.is_empty());
    }

    #[test]
    fn resolve_kill_list_strips_inherited_filters() {
        let mut registry = StyleRegistry::new();
        registry.update(style("A").with_run(["f1", "f2"]));
        registry.update(style("B").with_parent("A").with_run(["f3"]).with_kill(["f1"]));

        let resolved = registry.resolve(Some("B")).expect("resolves");
        assert_eq!(resolved.filters, vec!["f2", "f3"]);
    }

    #[test]
    fn resolve_missing_parent_degrades_gracefully() {
        let mut registry = StyleRegistry::new();
        registry.update(style("orphan").with_parent("ghost").with_run(["f"]));
        let resolved = registry.resolve(Some("orphan")).expect("resolves");
        assert_eq!(resolved.filters, vec!["f"]);
    }

    #[test]
    fn resolve_detects_two_style_cycle() {
        let mut registry = StyleRegistry::new();
        registry.update(style("a").with_parent("b"));
        registry.update(style("b").with_parent("a"));

        let err = registry.resolve(Some("a")).unwrap_err();
        match err {
            PanacheError::CyclicInheritance { chain } => {
                assert_eq!(chain, vec!["a", "b", "a"]);
            }
            other => panic!("expected cycle, got {other}"),
        }
    }

    #[test]
    fn resolve_detects_self_parent() {
        let mut registry = StyleRegistry::new();
        registry.update(style("loop").with_parent("loop"));
        let err = registry.resolve(Some("loop")).unwrap_err();
        assert!(err.to_string().contains("loop -> loop"), "got: {err}");
    }

    #[test]
    fn resolve_is_idempotent() {
        let mut registry = StyleRegistry::new();
        registry.update(style("base").with_run(["x"]).with_metadata("k", 1));
        registry.update(style("leaf").with_parent("base").with_kill(["x"]));
        let first = registry.resolve(Some("leaf")).expect("resolves");
        let second = registry.resolve(Some("leaf")).expect("resolves");
        assert_eq!(first, second);
    }

    #[test]
    fn definitions_iterate_in_name_order() {
        let mut registry = StyleRegistry::new();
        registry.update(style("b"));
        registry.update(style("a"));
        let names: Vec<_> = registry.definitions().map(StyleDefinition::name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
