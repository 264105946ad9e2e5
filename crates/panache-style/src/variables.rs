//! Style variables: default metadata describing the run.
//!
//! Variables are merged underneath the resolved metadata, so a style can
//! override any of them.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use panache_common::constants::APP_NAME;
use panache_common::error::{PanacheError, Result};
use serde_yaml::Value;

/// Format of the `build_date` variable.
pub const BUILD_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Facts about the current run used to derive default variables.
#[derive(Debug, Clone)]
pub struct VariableContext<'a> {
    /// Version string of the running tool.
    pub version: &'a str,
    /// Timestamp recorded as `build_date`.
    pub now: DateTime<Utc>,
    /// Directory containing the running tool, if known.
    pub app_dir: Option<&'a Path>,
    /// Style directory in use, if any.
    pub style_dir: Option<&'a Path>,
    /// Input document, if not read from stdin.
    pub input: Option<&'a Path>,
    /// Output document, if not written to stdout.
    pub output: Option<&'a Path>,
}

/// Ordered map of variable name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleVariables {
    vars: BTreeMap<String, Value>,
}

impl StyleVariables {
    /// Creates an empty variable set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the default variables for a run.
    #[must_use]
    pub fn with_defaults(ctx: &VariableContext<'_>) -> Self {
        let mut vars = Self::new();
        vars.set(format!("{APP_NAME}_version_{}", ctx.version), true);
        vars.set(format!("os_{}", os_name(std::env::consts::FAMILY)), true);
        vars.set("build_date", ctx.now.format(BUILD_DATE_FORMAT).to_string());

        if let Some(dir) = ctx.app_dir {
            vars.set(format!("{APP_NAME}_dir"), path_string(dir));
        }
        if let Some(dir) = ctx.style_dir {
            vars.set("style_dir", path_string(dir));
        }

        // input_* are always present, empty when reading stdin
        vars.set_path_parts("input", ctx.input.unwrap_or_else(|| Path::new("")));
        if let Some(output) = ctx.output {
            vars.set_path_parts("output", output);
        }
        vars
    }

    /// Sets a variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let _ = self.vars.insert(key.into(), value.into());
    }

    /// Applies a `KEY:VALUE` assignment.
    ///
    /// Keys consist of lowercase ASCII letters and underscores. Assigning a
    /// key that already exists turns its value into a list of all values.
    ///
    /// # Errors
    ///
    /// Returns [`PanacheError::InvalidStyleVariable`] if the assignment is
    /// malformed.
    pub fn assign(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment
            .split_once(':')
            .filter(|(key, _)| {
                !key.is_empty() && key.chars().all(|c| c.is_ascii_lowercase() || c == '_')
            })
            .ok_or_else(|| PanacheError::InvalidStyleVariable {
                assignment: assignment.to_owned(),
            })?;

        let value = Value::from(value);
        match self.vars.get_mut(key) {
            None => {
                let _ = self.vars.insert(key.to_owned(), value);
            }
            Some(Value::Sequence(values)) => values.push(value),
            Some(existing) => {
                let first = std::mem::take(existing);
                *existing = Value::Sequence(vec![first, value]);
            }
        }
        Ok(())
    }

    /// Looks up a variable.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    /// All variables in key order.
    pub const fn as_map(&self) -> &BTreeMap<String, Value> {
        &self.vars
    }

    fn set_path_parts(&mut self, prefix: &str, path: &Path) {
        let dir = path.parent().map(path_string).unwrap_or_default();
        let basename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let root = path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        self.set(format!("{prefix}_dir"), dir);
        self.set(format!("{prefix}_basename"), basename);
        self.set(format!("{prefix}_basename_root"), root);
        self.set(format!("{prefix}_basename_extension"), extension);
    }
}

/// Maps a platform family onto the names style libraries key on.
fn os_name(family: &str) -> &str {
    match family {
        "unix" => "posix",
        "windows" => "nt",
        other => other,
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
