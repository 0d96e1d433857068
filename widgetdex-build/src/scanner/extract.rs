//! Text-level extraction of widget structs, `#[live]` fields and doc comments.
//!
//! Everything here is pattern matching over raw source text. Nothing is
//! parsed, so declarations inside comments or string literals are matched
//! like real ones.

use once_cell::sync::Lazy;
use regex::Regex;

use super::rules::ExclusionPolicy;
use super::span::find_balanced_span;
use crate::catalog::{Widget, WidgetProperty};

/// `#[derive(..Live..)]` or `#[derive(..Widget..)]`, optional further
/// attributes, then `pub struct Name {`.
static WIDGET_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\[derive\([^\]]*(?:Live|Widget)[^\]]*\)\]\s*(?:#\[[^\]]*\]\s*)*pub struct (\w+)\s*\{")
        .expect("widget declaration pattern")
});

/// `#[live]` or `#[live(default)]`, optional `pub`, then `name: Type`.
static LIVE_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\[live(?:\(([^)]*)\))?\]\s*(?:pub\s+)?(\w+):\s*([^,\n]+)").expect("live field pattern")
});

/// Size of the window above a declaration inspected for doc comments.
/// The partial line the declaration starts on counts toward it.
const DOC_LOOKBACK_LINES: usize = 10;

/// Extract every widget declared in `text`.
///
/// `file_name` is recorded on each widget. Names rejected by `policy` are
/// skipped entirely.
pub fn extract_widgets(text: &str, file_name: &str, policy: &ExclusionPolicy) -> Vec<Widget> {
    let mut widgets = Vec::new();

    for caps in WIDGET_DECL.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();

        if policy.is_excluded(name) {
            log::debug!("skipping internal type {name} in {file_name}");
            continue;
        }

        let open_at = whole.end();
        let body = find_balanced_span(text, open_at)
            .map(|span| &text[span])
            .unwrap_or("");

        let widget = Widget {
            name: name.to_string(),
            file: file_name.to_string(),
            properties: extract_properties(body),
            doc: extract_doc_comment(text, whole.start()),
        };
        log::debug!(
            "found widget {} in {file_name} ({} properties)",
            widget.name,
            widget.properties.len()
        );
        widgets.push(widget);
    }

    widgets
}

/// Pull `#[live]` fields out of a struct body, in declaration order.
///
/// Fields with other attributes (`#[rust]`, `#[deref]`, ...) or none at all
/// are ignored. The type is whatever follows the colon up to the next comma
/// or line break.
pub fn extract_properties(body: &str) -> Vec<WidgetProperty> {
    LIVE_FIELD
        .captures_iter(body)
        .filter_map(|caps| {
            let name = caps.get(2)?.as_str();
            let prop_type = caps.get(3)?.as_str().trim().trim_end_matches(',');
            let default = caps
                .get(1)
                .map(|m| m.as_str().trim())
                .filter(|d| !d.is_empty())
                .map(str::to_string);
            Some(WidgetProperty::new(name, prop_type, default))
        })
        .collect()
}

/// Collect the `///` lines directly above the declaration starting at `decl_start`.
///
/// Attribute lines are stepped over. A blank line or any other code ends the
/// run, so a comment block separated from the declaration is not attached.
pub fn extract_doc_comment(text: &str, decl_start: usize) -> String {
    let before = &text[..decl_start.min(text.len())];
    let mut doc_lines = Vec::new();
    // The first piece walked is the (partial) line the declaration starts on.
    for line in before.rsplit('\n').take(DOC_LOOKBACK_LINES).skip(1) {
        let stripped = line.trim();
        if let Some(doc) = stripped.strip_prefix("///") {
            let doc = doc.trim();
            if !doc.is_empty() {
                doc_lines.push(doc);
            }
        } else if stripped.starts_with('#') {
            continue;
        } else {
            break;
        }
    }

    doc_lines.reverse();
    doc_lines.join(" ")
}
