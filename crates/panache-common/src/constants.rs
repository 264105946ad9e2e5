//! Reserved YAML words, default paths, and other fixed values.

use std::path::PathBuf;

/// Top-level key holding style definitions, in style files and front matter.
pub const STYLEDEF_KEY: &str = "styledef_";
/// Front-matter key mapping a medium to a style name.
pub const STYLES_KEY: &str = "styles_";
/// Style record key naming the parent style.
pub const PARENT_KEY: &str = "parent";
/// Style record key holding command-line options.
pub const COMMANDLINE_KEY: &str = "commandline";
/// Style record key holding document metadata.
pub const METADATA_KEY: &str = "metadata";
/// Style record key holding the filter run/kill lists.
pub const FILTER_KEY: &str = "filter";
/// Filter sub-key listing filters to activate.
pub const RUN_KEY: &str = "run";
/// Filter sub-key listing filters to suppress.
pub const KILL_KEY: &str = "kill";

/// Extension (without dot) of style definition files.
pub const STYLE_FILE_EXTENSION: &str = "yaml";

/// Name of the per-user style directory inside the home directory.
pub const STYLE_DIR_NAME: &str = ".panache";

/// Environment variable overriding the style directory.
pub const STYLE_DIR_ENV: &str = "PANACHE_STYLE_DIR";

/// Document processor the compiled command line targets.
pub const PROCESSOR: &str = "pandoc";

/// Application name used in CLI output and style variables.
pub const APP_NAME: &str = "panache";

/// Returns `$HOME/.panache` (or `%USERPROFILE%\.panache`), if a home
/// directory is known. The directory is not required to exist.
pub fn default_style_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()
        .map(|home| PathBuf::from(home).join(STYLE_DIR_NAME))
}
