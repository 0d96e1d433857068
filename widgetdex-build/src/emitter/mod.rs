//! Artifact emitters.
//!
//! Each emitter turns the scanned catalog (or location index) into one
//! output document:
//! - `snippets`: VS Code snippet JSON
//! - `docs`: the Markdown widget reference
//! - `locations`: the go-to-definition index
//! - `hover`: hover text for widgets and layout properties

mod docs;
mod hover;
mod locations;
mod snippets;
mod templates;

pub use docs::render_documentation;
pub use hover::{
    HoverDocument, HoverTable, PropertyHover, PropertyHoverEntry, WidgetHover, WidgetHoverEntry, build_hover_document,
};
pub use locations::render_locations;
pub use snippets::{
    Snippet, SnippetBody, SnippetCollection, SnippetCounts, build_snippet_document, widget_prefix, widget_snippet,
    widget_snippets,
};
pub use templates::{TemplateEntry, TemplateSet};

use crate::error::Result;

/// Serialize any emitted document as pretty JSON with a trailing newline.
pub fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
