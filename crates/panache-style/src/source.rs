//! Discovery and parsing of style definition sources.
//!
//! A style directory is scanned for `*.yaml` files (non-recursively). Files
//! are returned sorted by path so that first-wins duplicate suppression in
//! [`crate::StyleRegistry::load`] is reproducible. A file that cannot be read
//! or parsed does not abort the scan: its error travels inside the returned
//! [`StyleSource`] and the registry skips it.

use std::path::{Path, PathBuf};

use panache_common::constants::STYLE_FILE_EXTENSION;
use panache_common::error::{PanacheError, Result};
use serde_yaml::Value;

/// One parsed (or failed) definition source, in load order.
#[derive(Debug)]
pub struct StyleSource {
    /// Provenance label, usually the file path.
    pub label: String,
    /// The parsed YAML document, or why it could not be produced.
    pub document: Result<Value>,
}

impl StyleSource {
    /// Wraps an already-parsed document.
    pub fn new(label: impl Into<String>, document: Value) -> Self {
        Self {
            label: label.into(),
            document: Ok(document),
        }
    }

    /// Parses YAML text into a source. Blank text yields a `null` document.
    pub fn parse(label: impl Into<String>, text: &str) -> Self {
        let label = label.into();
        let document = parse_yaml(&label, text);
        Self { label, document }
    }
}

/// Parses YAML text, mapping failures to [`PanacheError::MalformedSource`].
///
/// # Errors
///
/// Returns an error if `text` is not valid YAML.
pub fn parse_yaml(label: &str, text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(text).map_err(|e| PanacheError::MalformedSource {
        source_label: label.to_owned(),
        message: e.to_string(),
    })
}

/// Lists the style files of `dir` in lexicographic path order.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn list_style_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| PanacheError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext == STYLE_FILE_EXTENSION)
        })
        .collect();
    paths.sort();
    Ok(paths)
}

/// Reads and parses every style file of `dir`, in sorted order.
///
/// # Errors
///
/// Returns an error if the directory itself cannot be read. Per-file read
/// and parse failures are captured in the corresponding [`StyleSource`].
pub fn read_dir(dir: &Path) -> Result<Vec<StyleSource>> {
    tracing::debug!(dir = %dir.display(), "scanning style directory");
    let sources = list_style_files(dir)?
        .into_iter()
        .map(|path| read_file(&path))
        .collect();
    Ok(sources)
}

/// Reads and parses one style file.
pub fn read_file(path: &Path) -> StyleSource {
    let label = path.display().to_string();
    match std::fs::read_to_string(path) {
        Ok(text) => StyleSource::parse(label, &text),
        Err(e) => StyleSource {
            label,
            document: Err(PanacheError::Io {
                path: path.to_path_buf(),
                source: e,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).expect("write style file");
    }

    #[test]
    fn blank_text_is_null_document() {
        let source = StyleSource::parse("empty.yaml", "  \n");
        assert!(matches!(source.document, Ok(Value::Null)));
    }

    #[test]
    fn invalid_yaml_is_malformed_source() {
        let source = StyleSource::parse("bad.yaml", "styledef_: [unclosed");
        match source.document {
            Err(PanacheError::MalformedSource { source_label, .. }) => {
                assert_eq!(source_label, "bad.yaml");
            }
            other => panic!("expected malformed source, got {other:?}"),
        }
    }

    #[test]
    fn lists_only_yaml_files_sorted() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "b.yaml", "x: 1");
        write(dir.path(), "a.yaml", "x: 1");
        write(dir.path(), "c.yml", "x: 1");
        write(dir.path(), "notes.txt", "x");
        std::fs::create_dir(dir.path().join("sub.yaml")).expect("mkdir");

        let files = list_style_files(dir.path()).expect("should list");
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.yaml"]);
    }

    #[test]
    fn read_dir_keeps_broken_files_as_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "1-good.yaml", "styledef_:\n  a: {}\n");
        write(dir.path(), "2-bad.yaml", "styledef_: [");

        let sources = read_dir(dir.path()).expect("should read");
        assert_eq!(sources.len(), 2);
        assert!(sources[0].document.is_ok());
        assert!(sources[1].document.is_err());
        assert!(sources[1].label.ends_with("2-bad.yaml"));
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_dir(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, PanacheError::Io { .. }), "got: {err}");
    }
}
