//! Choosing which style to resolve.

use panache_common::constants::STYLES_KEY;
use serde_yaml::Value;

/// Picks the style for a run.
///
/// A document can map media to styles under `styles_`. If `medium` is given
/// and the document maps it, that style is used; otherwise `fallback`.
pub fn select_style(
    document: Option<&Value>,
    medium: Option<&str>,
    fallback: Option<&str>,
) -> Option<String> {
    let mapped = medium.and_then(|medium| {
        document?
            .get(STYLES_KEY)?
            .get(medium)?
            .as_str()
            .map(ToOwned::to_owned)
    });

    let style = mapped.or_else(|| fallback.filter(|s| !s.is_empty()).map(ToOwned::to_owned));
    match &style {
        Some(name) => tracing::info!(style = %name, medium = ?medium, "selected style"),
        None => tracing::info!(medium = ?medium, "no style selected"),
    }
    style
}
