//! Decoding of a single style record.
//!
//! A style record is loosely typed YAML. Decoding is lenient: every optional
//! field falls back to its empty value when its key is missing or holds the
//! wrong shape. Only an empty style name is rejected.

use std::collections::BTreeMap;

use panache_common::constants::{
    COMMANDLINE_KEY, FILTER_KEY, KILL_KEY, METADATA_KEY, PARENT_KEY, RUN_KEY,
};
use panache_common::error::{PanacheError, Result};
use panache_common::types::OptionValue;
use serde::Serialize;
use serde_yaml::Value;

/// One named style: options, metadata, filters, and an optional parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleDefinition {
    name: String,
    parent: Option<String>,
    commandline: BTreeMap<String, OptionValue>,
    metadata: BTreeMap<String, Value>,
    filters_run: Vec<String>,
    filters_kill: Vec<String>,
    source: String,
}

impl StyleDefinition {
    /// Creates an empty definition.
    ///
    /// # Errors
    ///
    /// Returns [`PanacheError::InvalidStyle`] if `name` is empty.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let source = source.into();
        if name.is_empty() {
            return Err(PanacheError::InvalidStyle {
                message: format!("empty style name (found in '{source}')"),
            });
        }
        Ok(Self {
            name,
            parent: None,
            commandline: BTreeMap::new(),
            metadata: BTreeMap::new(),
            filters_run: Vec::new(),
            filters_kill: Vec::new(),
            source,
        })
    }

    /// Decodes a definition from the YAML record stored under its name.
    ///
    /// `data` may be `None` (or YAML `null`) for a style that only exists
    /// by name.
    ///
    /// # Errors
    ///
    /// Returns [`PanacheError::InvalidStyle`] if `name` is empty.
    pub fn from_yaml(
        name: impl Into<String>,
        data: Option<&Value>,
        source: impl Into<String>,
    ) -> Result<Self> {
        let mut style = Self::new(name, source)?;
        let Some(record) = data.and_then(Value::as_mapping) else {
            if data.is_some_and(|v| !v.is_null()) {
                tracing::debug!(style = %style.name, "style record is not a mapping, using defaults");
            }
            return Ok(style);
        };

        style.parent = record
            .get(PARENT_KEY)
            .and_then(scalar_to_string)
            .filter(|p| !p.is_empty());

        let options = mapping_field(&style.name, record.get(COMMANDLINE_KEY), COMMANDLINE_KEY);
        if let Some(options) = options {
            style.commandline = decode_commandline(&style.name, options);
        }

        let metadata = mapping_field(&style.name, record.get(METADATA_KEY), METADATA_KEY);
        if let Some(metadata) = metadata {
            style.metadata = metadata
                .iter()
                .filter_map(|(k, v)| scalar_to_string(k).map(|k| (k, v.clone())))
                .collect();
        }

        if let Some(filter) = mapping_field(&style.name, record.get(FILTER_KEY), FILTER_KEY) {
            style.filters_run = decode_filter_list(&style.name, filter.get(RUN_KEY), RUN_KEY);
            style.filters_kill = decode_filter_list(&style.name, filter.get(KILL_KEY), KILL_KEY);
        }

        Ok(style)
    }

    /// Sets the parent style.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Adds a command-line option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        let _ = self.commandline.insert(key.into(), value.into());
        self
    }

    /// Adds a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let _ = self.metadata.insert(key.into(), value.into());
        self
    }

    /// Appends filters to the run list.
    #[must_use]
    pub fn with_run<I, S>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters_run.extend(filters.into_iter().map(Into::into));
        self
    }

    /// Appends filters to the kill list.
    #[must_use]
    pub fn with_kill<I, S>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters_kill.extend(filters.into_iter().map(Into::into));
        self
    }

    /// Style name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent style name, if any.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Command-line options declared by this style alone.
    pub const fn commandline(&self) -> &BTreeMap<String, OptionValue> {
        &self.commandline
    }

    /// Metadata declared by this style alone.
    pub const fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    /// Filters this style activates.
    pub fn filters_run(&self) -> &[String] {
        &self.filters_run
    }

    /// Filters this style suppresses from what it inherits.
    pub fn filters_kill(&self) -> &[String] {
        &self.filters_kill
    }

    /// Where this definition came from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Merges a later definition of the same style into this one.
    ///
    /// The parent is always replaced, even by `None`. Options and metadata
    /// are shallow-merged with `update` winning. Filter lists are appended
    /// without deduplication.
    pub(crate) fn merge(&mut self, update: Self) {
        self.parent = update.parent;
        self.commandline.extend(update.commandline);
        self.metadata.extend(update.metadata);
        self.filters_run.extend(update.filters_run);
        self.filters_kill.extend(update.filters_kill);
    }
}

fn mapping_field<'a>(
    style: &str,
    value: Option<&'a Value>,
    key: &str,
) -> Option<&'a serde_yaml::Mapping> {
    let value = value?;
    let mapping = value.as_mapping();
    if mapping.is_none() {
        tracing::debug!(style, key, "ignoring non-mapping value");
    }
    mapping
}

fn decode_commandline(style: &str, options: &serde_yaml::Mapping) -> BTreeMap<String, OptionValue> {
    let mut decoded = BTreeMap::new();
    for (key, value) in options {
        let Some(key) = scalar_to_string(key) else {
            continue;
        };
        let option = match value {
            Value::Bool(on) => OptionValue::Switch(*on),
            Value::String(s) => OptionValue::Value(s.clone()),
            Value::Number(n) => OptionValue::Value(n.to_string()),
            _ => {
                tracing::debug!(style, option = %key, "ignoring non-scalar option value");
                continue;
            }
        };
        let _ = decoded.insert(key, option);
    }
    decoded
}

fn decode_filter_list(style: &str, value: Option<&Value>, key: &str) -> Vec<String> {
    let Some(value) = value else {
        return Vec::new();
    };
    let Some(entries) = value.as_sequence() else {
        tracing::debug!(style, key, "ignoring non-list filter value");
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}

/// Stringifies a YAML scalar usable as a map key.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
