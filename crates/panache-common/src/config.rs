//! Configuration model for a style resolution session.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PanacheError, Result};

/// Root configuration for a panache session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanacheConfig {
    /// Directory holding `*.yaml` style definition files, if any.
    pub style_dir: Option<PathBuf>,
}

impl PanacheConfig {
    /// Builds a configuration from an explicitly requested style directory,
    /// falling back to [`crate::constants::default_style_dir`] when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if `explicit` is given but is not a directory.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        Self::discover_with_default(explicit, crate::constants::default_style_dir())
    }

    /// Same as [`Self::discover`] with an injected default directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `explicit` is given but is not a directory.
    pub fn discover_with_default(
        explicit: Option<&Path>,
        default_dir: Option<PathBuf>,
    ) -> Result<Self> {
        if let Some(dir) = explicit {
            if !dir.is_dir() {
                return Err(PanacheError::Config {
                    message: format!("no such directory '{}'", dir.display()),
                });
            }
            return Ok(Self {
                style_dir: Some(dir.to_path_buf()),
            });
        }

        Ok(Self {
            style_dir: default_dir.filter(|dir| dir.is_dir()),
        })
    }
}
