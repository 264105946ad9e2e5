//! Compilation of the pandoc argument vector and metadata document.
//!
//! Nothing here spawns a process. The caller decides what to do with the
//! argument vector.

use std::collections::BTreeMap;

use panache_common::constants::PROCESSOR;
use panache_common::error::Result;
use serde_yaml::Value;

use crate::resolved::ResolvedStyle;
use crate::variables::StyleVariables;

/// Paths and pass-through arguments of one pandoc invocation.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// Input document path.
    pub input: String,
    /// Path of the generated metadata document, if written.
    pub metadata_file: Option<String>,
    /// Output path, if not stdout.
    pub output: Option<String>,
    /// Extra arguments appended verbatim.
    pub passthrough: Vec<String>,
}

/// Merges variables underneath the resolved metadata.
pub fn merged_metadata(
    variables: &StyleVariables,
    resolved: &ResolvedStyle,
) -> BTreeMap<String, Value> {
    let mut merged = variables.as_map().clone();
    merged.extend(
        resolved
            .metadata
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    merged
}

/// Renders the metadata document handed to pandoc next to the input.
///
/// The YAML block starts on a fresh line and carries explicit `---` and
/// `...` markers.
///
/// # Errors
///
/// Returns an error if a metadata value cannot be serialized.
pub fn metadata_document(variables: &StyleVariables, resolved: &ResolvedStyle) -> Result<String> {
    let body = serde_yaml::to_string(&merged_metadata(variables, resolved))?;
    Ok(format!("\n\n---\n{body}...\n"))
}

/// Builds the full pandoc argument vector, program name first.
///
/// Options appear in key order, filters in resolution order, and
/// pass-through arguments last.
pub fn compile(invocation: &Invocation, resolved: &ResolvedStyle) -> Vec<String> {
    let mut command = vec![PROCESSOR.to_owned(), invocation.input.clone()];

    if let Some(metadata_file) = &invocation.metadata_file {
        command.push(metadata_file.clone());
    }
    if let Some(output) = &invocation.output {
        command.push(format!("--output={output}"));
    }
    command.extend(
        resolved
            .commandline
            .iter()
            .filter_map(|(key, value)| value.to_arg(key)),
    );
    command.extend(resolved.filters.iter().map(|f| format!("--filter={f}")));
    command.extend(invocation.passthrough.iter().cloned());

    tracing::debug!(args = command.len(), "compiled command line");
    command
}
