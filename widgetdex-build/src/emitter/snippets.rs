//! VS Code snippet records and the widget snippet generator.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::templates::TemplateSet;
use crate::catalog::{Catalog, Widget};

/// Snippet body: one line, or several lines joined by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnippetBody {
    Line(String),
    Lines(Vec<String>),
}

impl SnippetBody {
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::Line(line) => vec![line.as_str()],
            Self::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}

/// A single snippet entry as VS Code expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub prefix: String,
    pub body: SnippetBody,
    pub description: String,
}

/// Snippets keyed by label, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetCollection {
    entries: Vec<(String, Snippet)>,
}

impl SnippetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a snippet. An existing label keeps its position and takes the new value.
    pub fn insert(&mut self, label: impl Into<String>, snippet: Snippet) -> Option<Snippet> {
        let label = label.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(l, _)| *l == label) {
            log::warn!("snippet '{label}' defined twice, keeping the later one");
            return Some(std::mem::replace(existing, snippet));
        }
        self.entries.push((label, snippet));
        None
    }

    /// Merge `other` into `self` with last-write-wins semantics.
    pub fn merge(&mut self, other: Self) {
        for (label, snippet) in other.entries {
            self.insert(label, snippet);
        }
    }

    pub fn get(&self, label: &str) -> Option<&Snippet> {
        self.entries.iter().find(|(l, _)| l == label).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Snippet)> {
        self.entries.iter().map(|(l, s)| (l.as_str(), s))
    }
}

impl Serialize for SnippetCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, snippet) in &self.entries {
            map.serialize_entry(label, snippet)?;
        }
        map.end()
    }
}

/// Trigger prefix for a widget snippet, e.g. `mpbutton`.
pub fn widget_prefix(name: &str) -> String {
    format!("mp{}", name.to_lowercase())
}

/// Build the snippet for one widget.
///
/// Widgets with a hand-written body in `templates` use it; all others get an
/// empty block with the final cursor inside.
pub fn widget_snippet(widget: &Widget, templates: &TemplateSet) -> Snippet {
    let lower = widget.name.to_lowercase();
    let mut body = vec![format!("${{1:{lower}_name}} = <{}> {{", widget.name)];

    match templates.widget_body(&widget.name) {
        Some(lines) => body.extend(lines.iter().cloned()),
        None => body.push("    $0".to_string()),
    }
    body.push("}".to_string());

    Snippet {
        prefix: widget_prefix(&widget.name),
        body: SnippetBody::Lines(body),
        description: widget.description(),
    }
}

/// Snippets for every scanned widget on the common-widget list, in name order.
pub fn widget_snippets(catalog: &Catalog, templates: &TemplateSet) -> SnippetCollection {
    let mut snippets = SnippetCollection::new();
    for widget in catalog.iter().filter(|w| templates.is_common(&w.name)) {
        snippets.insert(format!("{} Widget", widget.name), widget_snippet(widget, templates));
    }
    snippets
}

/// Per-step counts of a built snippet document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SnippetCounts {
    pub widgets: usize,
    pub properties: usize,
    pub code: usize,
    pub layouts: usize,
    pub total: usize,
}

/// The full snippet file: widget snippets, then the property, code and
/// layout tables, merged last-write-wins.
pub fn build_snippet_document(catalog: &Catalog, templates: &TemplateSet) -> (SnippetCollection, SnippetCounts) {
    let widget = widget_snippets(catalog, templates);
    let property = templates.property_snippets();
    let code = templates.code_snippets();
    let layout = templates.layout_snippets();

    let mut counts = SnippetCounts {
        widgets: widget.len(),
        properties: property.len(),
        code: code.len(),
        layouts: layout.len(),
        total: 0,
    };

    let mut document = widget;
    document.merge(property);
    document.merge(code);
    document.merge(layout);
    counts.total = document.len();

    (document, counts)
}
