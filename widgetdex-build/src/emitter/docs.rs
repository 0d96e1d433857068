//! Markdown widget reference.

use std::fmt::Write;

use crate::catalog::{Catalog, Widget};

/// Render the widget reference document.
///
/// Widgets appear in name order, so the same catalog always renders to the
/// same bytes.
pub fn render_documentation(catalog: &Catalog) -> String {
    let mut content = String::new();

    let _ = writeln!(content, "# Makepad Widgets Reference\n");
    let _ = writeln!(content, "Auto-generated from Makepad source code.\n");
    let _ = writeln!(content, "## Table of Contents\n");

    for name in catalog.names() {
        let _ = writeln!(content, "- [{name}](#{})", name.to_lowercase());
    }

    let _ = writeln!(content, "\n---\n");

    for widget in catalog.iter() {
        render_widget(&mut content, widget);
    }

    content
}

fn render_widget(content: &mut String, widget: &Widget) {
    let _ = writeln!(content, "## {}\n", widget.name);
    let _ = writeln!(content, "**File:** `{}`\n", widget.file);

    if !widget.doc.is_empty() {
        let _ = writeln!(content, "{}\n", widget.doc);
    }

    if !widget.properties.is_empty() {
        let _ = writeln!(content, "### Properties\n");
        let _ = writeln!(content, "| Property | Type | Default |");
        let _ = writeln!(content, "|----------|------|--------|");
        for prop in &widget.properties {
            let default = prop.default.as_deref().unwrap_or("-");
            let _ = writeln!(content, "| `{}` | `{}` | {default} |", prop.name, prop.prop_type);
        }
        content.push('\n');
    }

    let _ = writeln!(content, "### Example\n");
    let _ = writeln!(content, "```rust");
    let _ = writeln!(content, "my_{} = <{}> {{", widget.name.to_lowercase(), widget.name);
    let _ = writeln!(content, "    // properties here");
    let _ = writeln!(content, "}}");
    let _ = writeln!(content, "```\n");
    let _ = writeln!(content, "---\n");
}
