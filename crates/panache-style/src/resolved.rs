//! The flattened parameter set a style resolves to.

use std::collections::BTreeMap;

use panache_common::types::OptionValue;
use serde::Serialize;
use serde_yaml::Value;

use crate::definition::StyleDefinition;

/// Effective options, metadata, and filters after inheritance.
///
/// The [`Default`] value is the identity: no options, no metadata, no filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedStyle {
    /// Command-line options, own keys overriding inherited ones.
    pub commandline: BTreeMap<String, OptionValue>,
    /// Metadata, own keys overriding inherited ones.
    pub metadata: BTreeMap<String, Value>,
    /// Active filters in the order they run.
    pub filters: Vec<String>,
}

impl ResolvedStyle {
    /// Returns `true` for the identity parameter set.
    pub fn is_empty(&self) -> bool {
        self.commandline.is_empty() && self.metadata.is_empty() && self.filters.is_empty()
    }

    /// Applies one inheritance level on top of the parent's resolved set.
    pub(crate) fn inherit(mut self, style: &StyleDefinition) -> Self {
        self.commandline.extend(
            style
                .commandline()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        self.metadata.extend(
            style
                .metadata()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        self.filters.extend(style.filters_run().iter().cloned());
        let kill = style.filters_kill();
        self.filters.retain(|f| !kill.contains(f));
        self
    }
}
