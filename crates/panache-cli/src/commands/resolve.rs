//! `panache resolve` — Print the flattened parameters of a style.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use panache_style::frontmatter;

/// Output format of the resolved parameters.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// YAML document.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

/// Arguments for the `resolve` command.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Style to resolve.
    pub style: String,

    /// Document whose `styledef_` front matter overrides the library.
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Yaml)]
    pub format: Format,
}

/// Executes the `resolve` command.
///
/// # Errors
///
/// Returns an error if the library or document cannot be loaded, or the
/// style inherits cyclically.
pub fn execute(args: ResolveArgs, style_dir: Option<&Path>) -> anyhow::Result<()> {
    let (_, mut registry) = super::load_registry(style_dir)?;

    if let Some(path) = &args.input {
        if let Some(document) = frontmatter::read(path)? {
            let _ = registry.update_from_document(&path.display().to_string(), &document);
        }
    }

    if !registry.contains(&args.style) {
        tracing::warn!(style = %args.style, "style is not defined, result is empty");
    }
    let resolved = registry.resolve(Some(args.style.as_str()))?;

    let rendered = match args.format {
        Format::Yaml => serde_yaml::to_string(&resolved)?,
        Format::Json => format!("{}\n", serde_json::to_string_pretty(&resolved)?),
    };
    print!("{rendered}");

    Ok(())
}
