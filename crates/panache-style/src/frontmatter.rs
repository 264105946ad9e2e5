//! YAML front matter of Pandoc-flavoured Markdown documents.
//!
//! A YAML block opens on a line consisting of `---` and closes on a line of
//! three `-` or `.` characters (trailing whitespace allowed). Every block in
//! the document contributes its lines; they are parsed as one YAML document.

use std::path::Path;

use panache_common::error::{PanacheError, Result};
use serde_yaml::Value;

use crate::source::parse_yaml;

fn is_block_start(line: &str) -> bool {
    line.trim_end() == "---"
}

fn is_block_end(line: &str) -> bool {
    let line = line.trim_end();
    line.len() == 3 && line.chars().all(|c| c == '-' || c == '.')
}

/// Collects the YAML lines of all front-matter blocks in `text`.
///
/// Returns `None` if the document contains no YAML lines.
pub fn extract(text: &str) -> Option<String> {
    let mut in_yaml = false;
    let mut yaml = String::new();

    for line in text.lines() {
        if !in_yaml {
            in_yaml = is_block_start(line);
        } else if is_block_end(line) {
            in_yaml = false;
        } else {
            yaml.push_str(line);
            yaml.push('\n');
        }
    }

    if yaml.is_empty() { None } else { Some(yaml) }
}

/// Extracts and parses the front matter of a document.
///
/// # Errors
///
/// Returns [`PanacheError::MalformedSource`] if the front matter is not
/// valid YAML.
pub fn parse(label: &str, text: &str) -> Result<Option<Value>> {
    let Some(yaml) = extract(text) else {
        tracing::debug!(source = %label, "document has no front matter");
        return Ok(None);
    };
    parse_yaml(label, &yaml).map(Some)
}

/// Reads a document from disk and parses its front matter.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its front matter is not
/// valid YAML.
pub fn read(path: &Path) -> Result<Option<Value>> {
    let text = std::fs::read_to_string(path).map_err(|e| PanacheError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&path.display().to_string(), &text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_single_block() {
        let doc = "---\ntitle: Hello\n...\n\n# Body\n";
        assert_eq!(extract(doc).as_deref(), Some("title: Hello\n"));
    }

    #[test]
    fn extract_multiple_blocks() {
        let doc = "---\na: 1\n---\ntext\n---   \nb: 2\n...\n";
        assert_eq!(extract(doc).as_deref(), Some("a: 1\nb: 2\n"));
    }

    #[test]
    fn extract_without_front_matter() {
        assert!(extract("# Title\n\nJust text.\n").is_none());
    }

    #[test]
    fn indented_marker_does_not_open_block() {
        assert!(extract("  ---\na: 1\n...\n").is_none());
    }

    #[test]
    fn parse_reads_styles_and_overrides() {
        let doc = "---\nstyles_:\n  html: wiki\nstyledef_:\n  wiki:\n    metadata: {lang: it}\n...\nBody\n";
        let yaml = parse("doc.md", doc).expect("valid").expect("has front matter");
        assert_eq!(yaml["styles_"]["html"], Value::from("wiki"));
        assert!(yaml["styledef_"]["wiki"].is_mapping());
    }

    #[test]
    fn parse_reports_malformed_front_matter() {
        let err = parse("doc.md", "---\na: [\n...\n").unwrap_err();
        assert!(matches!(err, PanacheError::MalformedSource { .. }), "got: {err}");
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read(&dir.path().join("missing.md")).unwrap_err();
        assert!(matches!(err, PanacheError::Io { .. }), "got: {err}");
    }
}
