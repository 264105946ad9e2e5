//! Domain primitive types used across the panache workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Value of a single command-line option in a style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// `true` emits the bare flag, `false` suppresses it.
    Switch(bool),
    /// Emits `--key=value`.
    Value(String),
}

impl OptionValue {
    /// Renders this option as a command-line argument for `key`.
    ///
    /// Returns `None` for a disabled switch.
    #[must_use]
    pub fn to_arg(&self, key: &str) -> Option<String> {
        match self {
            Self::Switch(true) => Some(format!("--{key}")),
            Self::Switch(false) => None,
            Self::Value(value) => Some(format!("--{key}={value}")),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Switch(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Value(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Switch(on) => write!(f, "{on}"),
            Self::Value(value) => write!(f, "{value}"),
        }
    }
}
