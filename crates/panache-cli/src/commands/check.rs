//! `panache check` — Check the style library for inheritance problems.

use std::path::Path;

use clap::Args;
use panache_style::graph::InheritanceGraph;

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Also list every style with its parent and source.
    #[arg(short, long)]
    pub list: bool,
}

/// Executes the `check` command.
///
/// Dangling parents are reported but tolerated, since resolution treats them
/// as the end of the chain. Cycles fail the check.
///
/// # Errors
///
/// Returns an error if the library cannot be read or contains a cycle.
pub fn execute(args: CheckArgs, style_dir: Option<&Path>) -> anyhow::Result<()> {
    let (config, registry) = super::load_registry(style_dir)?;
    let Some(dir) = config.style_dir else {
        anyhow::bail!("no style directory found; pass --style-dir");
    };

    let graph = InheritanceGraph::from_registry(&registry);
    println!("Style library: {}", dir.display());
    println!("  {} style(s) defined.", graph.len());

    for (style, parent) in graph.dangling_parents() {
        println!("  warning: '{style}' inherits from undefined '{parent}'");
    }

    let cycles = graph.cycles();
    for cycle in &cycles {
        println!("  error: cyclic inheritance between {}", cycle.join(", "));
    }
    if !cycles.is_empty() {
        anyhow::bail!("{} inheritance cycle(s) found", cycles.len());
    }

    if args.list {
        println!();
        for name in graph.resolve_order()? {
            if let Some(style) = registry.get(&name) {
                println!(
                    "  {:<20} {:<20} {}",
                    name,
                    style.parent().unwrap_or("-"),
                    style.source()
                );
            }
        }
    }

    Ok(())
}
