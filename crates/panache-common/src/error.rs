//! Unified error types for the panache workspace.
//!
//! Unknown styles and duplicate definitions are deliberately absent: both are
//! recovered locally by the registry and only ever surface as log warnings.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum PanacheError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A definition source or document could not be parsed as YAML.
    #[error("malformed source {source_label}: {message}")]
    MalformedSource {
        /// Label of the offending source (usually its path).
        source_label: String,
        /// Parser diagnostic.
        message: String,
    },

    /// A style definition could not be constructed.
    #[error("invalid style: {message}")]
    InvalidStyle {
        /// Description of the problem.
        message: String,
    },

    /// A style's parent chain loops back onto itself.
    #[error("cyclic inheritance: {}", chain.join(" -> "))]
    CyclicInheritance {
        /// Style names in visit order, ending with the repeated name.
        chain: Vec<String>,
    },

    /// A `KEY:VALUE` style variable assignment is malformed.
    #[error("invalid style variable '{assignment}'")]
    InvalidStyleVariable {
        /// The assignment as given by the user.
        assignment: String,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// Serialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_yaml::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, PanacheError>;
