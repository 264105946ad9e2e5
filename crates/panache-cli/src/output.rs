//! Formatted output helpers for CLI commands.

use std::path::Path;

/// Renders a path with forward slashes, as pandoc expects on every platform.
#[must_use]
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Joins an argument vector into a copy-pasteable shell line.
///
/// Arguments containing whitespace or shell quoting characters are wrapped
/// in single quotes.
#[must_use]
pub fn format_command(args: &[String]) -> String {
    args.iter()
        .map(|arg| quote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote(arg: &str) -> String {
    let needs_quotes = arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '$' | '`' | '\\' | '*' | '?'));
    if needs_quotes {
        format!("'{}'", arg.replace('\'', r"'\''"))
    } else {
        arg.to_owned()
    }
}

/// Indents every non-empty line of `text` by `width` spaces.
#[must_use]
pub fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_command_plain_args() {
        let args = vec!["pandoc".to_string(), "in.md".into(), "--toc".into()];
        assert_eq!(format_command(&args), "pandoc in.md --toc");
    }

    #[test]
    fn format_command_quotes_spaces_and_quotes() {
        let args = vec!["--title=My Doc".to_string(), "it's".into(), String::new()];
        assert_eq!(format_command(&args), r"'--title=My Doc' 'it'\''s' ''");
    }

    #[test]
    fn indent_skips_empty_lines() {
        assert_eq!(indent("a\n\nb", 2), "  a\n\n  b");
    }

    #[test]
    fn display_path_uses_forward_slashes() {
        assert_eq!(display_path(Path::new(r"C:\docs\a.md")), "C:/docs/a.md");
    }
}
