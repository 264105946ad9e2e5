//! # panache-style
//!
//! Style definitions and their inheritance resolution.
//!
//! Handles:
//! - **Definition**: Lenient decoding of one style record into a [`StyleDefinition`].
//! - **Registry**: Bulk loading (first wins), document overrides (last wins),
//!   and recursive resolution into a flat [`ResolvedStyle`].
//! - **Source**: Discovery and parsing of `*.yaml` style files in sorted order.
//! - **Front matter**: YAML extraction from Pandoc-flavoured Markdown.
//! - **Selection**: Medium-to-style lookup with a fallback style.
//! - **Graph**: Whole-library inheritance checks (dangling parents, cycles).
//! - **Variables**: Default metadata derived from the environment and `--style-var`.
//! - **Command**: Compilation of the pandoc argument vector and metadata document.

pub mod command;
pub mod definition;
pub mod frontmatter;
pub mod graph;
pub mod registry;
pub mod resolved;
pub mod selection;
pub mod source;
pub mod variables;

pub use definition::StyleDefinition;
pub use registry::{LoadReport, StyleRegistry};
pub use resolved::ResolvedStyle;
pub use source::StyleSource;
