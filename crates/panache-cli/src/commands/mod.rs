//! CLI command definitions and dispatch.

pub mod check;
pub mod plan;
pub mod resolve;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use panache_common::config::PanacheConfig;
use panache_style::{StyleRegistry, source};

/// panache — pandoc wrapped in styles.
#[derive(Parser, Debug)]
#[command(name = "panache", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Where to find style definitions (default: `~/.panache` if present).
    #[arg(long, global = true, env = panache_common::constants::STYLE_DIR_ENV, value_name = "PATH")]
    pub style_dir: Option<PathBuf>,

    /// Print progress info to stderr.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Print debug info to stderr.
    #[arg(long, global = true)]
    pub debug: bool,
}

impl Cli {
    /// Log level requested by flags, if any. `RUST_LOG` applies otherwise.
    pub const fn log_level(&self) -> Option<&'static str> {
        if self.debug {
            Some("debug")
        } else if self.verbose {
            Some("info")
        } else {
            None
        }
    }
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the metadata and pandoc command line a document would be built with.
    Plan(plan::PlanArgs),
    /// Print the flattened parameters of a style.
    Resolve(resolve::ResolveArgs),
    /// Check the style library for dangling parents and cycles.
    Check(check::CheckArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let style_dir = cli.style_dir;
    match cli.command {
        Command::Plan(args) => plan::execute(args, style_dir.as_deref()),
        Command::Resolve(args) => resolve::execute(args, style_dir.as_deref()),
        Command::Check(args) => check::execute(args, style_dir.as_deref()),
    }
}

/// Discovers the style directory and loads every definition in it.
///
/// A missing default directory yields an empty registry.
fn load_registry(style_dir: Option<&Path>) -> anyhow::Result<(PanacheConfig, StyleRegistry)> {
    let config = PanacheConfig::discover(style_dir)?;
    let mut registry = StyleRegistry::new();

    if let Some(dir) = &config.style_dir {
        tracing::info!(dir = %dir.display(), "loading styles");
        let report = registry.load(source::read_dir(dir)?);
        tracing::info!(
            added = report.added,
            duplicates = report.duplicates,
            skipped = report.skipped_sources,
            "styles loaded"
        );
    } else {
        tracing::info!("no style directory, starting with an empty library");
    }

    Ok((config, registry))
}
