//! `panache plan` — Show the metadata and command line for a document.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use panache_style::command::{self, Invocation};
use panache_style::variables::{StyleVariables, VariableContext};
use panache_style::{frontmatter, selection};

use crate::output;

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Input document. Read from stdin if omitted.
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output path passed to pandoc.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Target medium, looked up in the document's `styles_` mapping.
    #[arg(long)]
    pub medium: Option<String>,

    /// Fallback style if the medium does not select one.
    #[arg(long)]
    pub style: Option<String>,

    /// Extra metadata variable; repeat a key to build a list.
    #[arg(long = "style-var", value_name = "KEY:VALUE")]
    pub style_vars: Vec<String>,

    /// Write the metadata document to this file and reference it in the command.
    #[arg(long, value_name = "PATH")]
    pub metadata_file: Option<PathBuf>,

    /// Arguments passed through to pandoc.
    #[arg(last = true)]
    pub pandoc_args: Vec<String>,
}

/// Executes the `plan` command.
///
/// Loads the style library, grafts the document's own style definitions
/// onto it, resolves the selected style, and prints the resulting metadata
/// document and pandoc command line.
///
/// # Errors
///
/// Returns an error if the input cannot be read, its front matter is
/// malformed, a style variable is invalid, or the style inherits cyclically.
pub fn execute(args: PlanArgs, style_dir: Option<&Path>) -> anyhow::Result<()> {
    let input = args.input.as_deref().map(std::path::absolute).transpose()?;
    let output_path = args.output.as_deref().map(std::path::absolute).transpose()?;
    if let Some(path) = &input {
        if !path.is_file() {
            anyhow::bail!("no such file '{}'", path.display());
        }
    }

    let (config, mut registry) = super::load_registry(style_dir)?;

    let document = match &input {
        Some(path) => frontmatter::read(path)?,
        None => {
            let mut text = String::new();
            let _ = std::io::stdin().read_to_string(&mut text)?;
            frontmatter::parse("<stdin>", &text)?
        }
    };

    let label = input
        .as_ref()
        .map_or_else(|| "<stdin>".to_owned(), |p| p.display().to_string());
    if let Some(document) = &document {
        let applied = registry.update_from_document(&label, document);
        tracing::debug!(applied, "applied document style definitions");
    }

    let style = selection::select_style(
        document.as_ref(),
        args.medium.as_deref(),
        args.style.as_deref(),
    );
    let resolved = registry.resolve(style.as_deref())?;

    let app_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let mut variables = StyleVariables::with_defaults(&VariableContext {
        version: env!("CARGO_PKG_VERSION"),
        now: chrono::Utc::now(),
        app_dir: app_dir.as_deref(),
        style_dir: config.style_dir.as_deref(),
        input: input.as_deref(),
        output: output_path.as_deref(),
    });
    for assignment in &args.style_vars {
        variables.assign(assignment)?;
    }

    let metadata = command::metadata_document(&variables, &resolved)?;
    if let Some(path) = &args.metadata_file {
        std::fs::write(path, &metadata)?;
        tracing::info!(path = %path.display(), "wrote metadata document");
    }

    let invocation = Invocation {
        input: input
            .as_ref()
            .map_or_else(|| "-".to_owned(), |p| output::display_path(p)),
        metadata_file: args.metadata_file.as_deref().map(output::display_path),
        output: output_path.as_deref().map(output::display_path),
        passthrough: args.pandoc_args,
    };
    let command_line = command::compile(&invocation, &resolved);

    println!("Style: {}", style.as_deref().unwrap_or("(none)"));
    println!();
    println!("Metadata:");
    println!("{}", output::indent(metadata.trim_start_matches('\n'), 2));
    println!("Command:");
    println!("  {}", output::format_command(&command_line));

    Ok(())
}
